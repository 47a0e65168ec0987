//! Read-only statistics over the registry and ledger.
//!
//! Nothing here mutates state, and results depend only on the current contents of
//! the directory and ledger, so repeated calls return identical values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::AttendanceError;
use crate::ledger::Ledger;
use crate::registry::EmployeeDirectory;
use crate::shift::Shift;

/// Age statistics across all registered employees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeStats {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

/// One bar of the employees-by-age chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgePoint {
    pub name: String,
    pub age: u32,
}

/// One slice of the shift distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftShare {
    pub shift: Shift,
    pub count: usize,
    pub percent: f64,
}

/// Figures shown in the attendance report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_employees: usize,
    pub total_records: usize,
    pub by_shift: BTreeMap<Shift, usize>,
    pub ages: AgeStats,
}

/// Tally of employees per shift. Shifts with no employees are omitted.
pub fn counts_by_shift<D: EmployeeDirectory + ?Sized>(directory: &D) -> BTreeMap<Shift, usize> {
    let mut counts = BTreeMap::new();
    for employee in directory.all() {
        *counts.entry(employee.shift).or_insert(0) += 1;
    }
    counts
}

/// Mean, minimum and maximum age.
#[expect(
    clippy::cast_precision_loss,
    reason = "employee counts and age sums stay far below 2^52"
)]
pub fn age_stats<D: EmployeeDirectory + ?Sized>(
    directory: &D,
) -> Result<AgeStats, AttendanceError> {
    let employees = directory.all();
    let (Some(min), Some(max)) = (
        employees.iter().map(|e| e.age).min(),
        employees.iter().map(|e| e.age).max(),
    ) else {
        return Err(AttendanceError::NoEmployees);
    };

    let total: u64 = employees.iter().map(|e| u64::from(e.age)).sum();
    Ok(AgeStats {
        mean: total as f64 / employees.len() as f64,
        min,
        max,
    })
}

/// Employees ordered by ascending age. Equal ages keep registration order.
pub fn ages_ascending<D: EmployeeDirectory + ?Sized>(directory: &D) -> Vec<AgePoint> {
    let mut points: Vec<AgePoint> = directory
        .all()
        .into_iter()
        .map(|e| AgePoint {
            name: e.name.clone(),
            age: e.age,
        })
        .collect();
    points.sort_by_key(|p| p.age);
    points
}

/// Share of employees per shift, in shift order.
#[expect(
    clippy::cast_precision_loss,
    reason = "employee counts stay far below 2^52"
)]
pub fn shift_distribution<D: EmployeeDirectory + ?Sized>(directory: &D) -> Vec<ShiftShare> {
    let counts = counts_by_shift(directory);
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(shift, count)| ShiftShare {
            shift,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

/// Builds the report figures. Requires at least one employee.
pub fn summary<D: EmployeeDirectory + ?Sized>(
    directory: &D,
    ledger: &Ledger,
) -> Result<Summary, AttendanceError> {
    let ages = age_stats(directory)?;
    Ok(Summary {
        total_employees: directory.all().len(),
        total_records: ledger.record_count(),
        by_shift: counts_by_shift(directory),
        ages,
    })
}
