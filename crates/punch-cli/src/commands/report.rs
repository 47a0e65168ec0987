//! Report and chart commands.
//!
//! `report` prints headline figures (employee and record totals, shift tallies,
//! age statistics). `ages` and `shifts` print the series a chart would plot, with
//! text bars in place of graphics.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use punch_core::aggregate::{self, AgePoint, ShiftShare, Summary};
use punch_core::{AttendanceError, Ledger, Registry};

use super::util::truncate_name;

// ========== Progress Bar ==========

/// Generates a 10-character bar.
/// Values <5% of max get a single block for visibility.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bar width is a small non-negative ratio of counts"
)]
pub fn progress_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

// ========== Human-Readable Output ==========

/// Formats the summary report.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(output, "ATTENDANCE REPORT").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Employees: {}", summary.total_employees).unwrap();
    writeln!(output, "Records:   {}", summary.total_records).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "By shift:").unwrap();
    for (shift, count) in &summary.by_shift {
        writeln!(output, "  {:<10}  {count:>3}", shift.as_str()).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(
        output,
        "Age: mean {:.1}, min {}, max {}",
        summary.ages.mean, summary.ages.min, summary.ages.max
    )
    .unwrap();

    output
}

/// Formats the employees-by-age series as a bar chart.
pub fn format_ages(points: &[AgePoint]) -> String {
    let mut output = String::new();
    let max = points.iter().map(|p| p.age).max().unwrap_or(0);

    writeln!(output, "EMPLOYEES BY AGE").unwrap();
    writeln!(output).unwrap();
    for point in points {
        let name = truncate_name(&point.name);
        writeln!(
            output,
            "{name:<24}  {:>3}  {}",
            point.age,
            progress_bar(u64::from(point.age), u64::from(max))
        )
        .unwrap();
    }

    output
}

/// Formats the shift distribution as a bar chart with percentages.
pub fn format_shifts(shares: &[ShiftShare]) -> String {
    let mut output = String::new();
    let total: usize = shares.iter().map(|s| s.count).sum();

    writeln!(output, "SHIFT DISTRIBUTION").unwrap();
    writeln!(output).unwrap();
    for share in shares {
        writeln!(
            output,
            "{:<10}  {:>3}  {}  {:>5.1}%",
            share.shift.as_str(),
            share.count,
            progress_bar(share.count as u64, total as u64),
            share.percent
        )
        .unwrap();
    }

    output
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ledger: &Ledger,
    json: bool,
) -> Result<()> {
    let summary = aggregate::summary(registry, ledger)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}

/// Runs the ages command.
pub fn ages<W: Write>(writer: &mut W, registry: &Registry, json: bool) -> Result<()> {
    if registry.is_empty() {
        return Err(AttendanceError::NoEmployees.into());
    }
    let points = aggregate::ages_ascending(registry);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&points)?)?;
    } else {
        write!(writer, "{}", format_ages(&points))?;
    }
    Ok(())
}

/// Runs the shifts command.
pub fn shifts<W: Write>(writer: &mut W, registry: &Registry, json: bool) -> Result<()> {
    if registry.is_empty() {
        return Err(AttendanceError::NoEmployees.into());
    }
    let shares = aggregate::shift_distribution(registry);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&shares)?)?;
    } else {
        write!(writer, "{}", format_shifts(&shares))?;
    }
    Ok(())
}
