//! Demonstration data for trying the console.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use punch_core::{
    AttendanceError, ClockStamp, EmployeeDirectory, EmployeeId, Ledger, NewEmployee, Registry,
};

const EMPLOYEES: [(&str, &str, i64, &str); 4] = [
    ("001", "João Silva", 28, "morning"),
    ("002", "Maria Santos", 35, "afternoon"),
    ("003", "Pedro Oliveira", 42, "night"),
    ("004", "Ana Costa", 26, "morning"),
];

/// (employee, entrance, exit) on the sample day.
const SHIFTS: [(&str, (u32, u32), (u32, u32)); 2] =
    [("001", (8, 0), (17, 30)), ("002", (13, 0), (22, 0))];

/// Loads four employees and a day of attendance for two of them.
///
/// Refuses to run if any sample ID is already registered, leaving the session unchanged.
pub fn load<W: Write>(writer: &mut W, registry: &mut Registry, ledger: &mut Ledger) -> Result<()> {
    for (id, ..) in EMPLOYEES {
        let id = EmployeeId::new(id).map_err(AttendanceError::from)?;
        if registry.exists(&id) {
            return Err(AttendanceError::DuplicateEmployee { id }.into());
        }
    }

    for (id, name, age, shift) in EMPLOYEES {
        registry.register(NewEmployee {
            id: id.to_string(),
            name: name.to_string(),
            age,
            shift: shift.to_string(),
        })?;
    }

    let date = NaiveDate::from_ymd_opt(2025, 11, 28).context("invalid sample date")?;
    let at = |(hour, minute)| {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| ClockStamp::new(date, time))
            .context("invalid sample time")
    };
    for (id, entrance, exit) in SHIFTS {
        let id = EmployeeId::new(id).map_err(AttendanceError::from)?;
        ledger.record_entrance(&*registry, &id, at(entrance)?)?;
        ledger.record_exit(&*registry, &id, at(exit)?)?;
    }

    tracing::debug!(employees = EMPLOYEES.len(), records = SHIFTS.len(), "sample data loaded");
    writeln!(
        writer,
        "Sample data loaded: {} employees, {} records",
        EMPLOYEES.len(),
        SHIFTS.len()
    )?;
    Ok(())
}
