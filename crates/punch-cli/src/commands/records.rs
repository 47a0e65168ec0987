//! Attendance record listing.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use punch_core::{AttendanceRecord, EmployeeDirectory, Ledger, Registry};
use serde::Serialize;

use super::util::truncate_name;
use crate::Config;

/// A record joined with the employee's name, for JSON output.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    #[serde(flatten)]
    record: &'a AttendanceRecord,
    name: Option<&'a str>,
}

fn name_of<'a>(registry: &'a Registry, record: &AttendanceRecord) -> Option<&'a str> {
    registry
        .get(&record.employee_id)
        .map(|employee| employee.name.as_str())
}

/// Formats records as a table, open records showing `-` as exit.
pub fn format_records(
    registry: &Registry,
    records: &[AttendanceRecord],
    config: &Config,
) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{:<10}  {:<24}  {:<10}  {:<8}  Exit",
        "ID", "Name", "Date", "Entrance"
    )
    .unwrap();

    for record in records {
        let name = truncate_name(name_of(registry, record).unwrap_or("(unknown)"));
        let date = record.date.format(&config.date_format).to_string();
        let entrance = record.entrance.format(&config.time_format).to_string();
        let exit = record.exit.map_or_else(
            || "-".to_string(),
            |exit| exit.format(&config.time_format).to_string(),
        );

        writeln!(
            output,
            "{:<10}  {:<24}  {:<10}  {:<8}  {}",
            record.employee_id.as_str(),
            name,
            date,
            entrance,
            exit
        )
        .unwrap();
    }

    output
}

/// Serializes records, with employee names, as pretty JSON.
pub fn records_json(registry: &Registry, records: &[AttendanceRecord]) -> Result<String> {
    let rows: Vec<RecordRow<'_>> = records
        .iter()
        .map(|record| RecordRow {
            record,
            name: name_of(registry, record),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Lists every attendance record in insertion order.
pub fn list<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ledger: &Ledger,
    config: &Config,
    json: bool,
) -> Result<()> {
    let records = ledger.all_records();
    if json {
        writeln!(writer, "{}", records_json(registry, &records)?)?;
    } else if records.is_empty() {
        writeln!(writer, "No attendance records.")?;
    } else {
        write!(writer, "{}", format_records(registry, &records, config))?;
    }
    Ok(())
}
