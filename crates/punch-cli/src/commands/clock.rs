//! Clock-in, clock-out and per-employee history.

use std::io::Write;

use anyhow::Result;
use punch_core::{AttendanceError, ClockStamp, EmployeeDirectory, EmployeeId, Ledger, Registry};

use super::records::{format_records, records_json};
use super::util::resolve_stamp;
use crate::Config;
use crate::cli::ClockArgs;

/// Records an entrance.
pub fn clock_in<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ledger: &mut Ledger,
    config: &Config,
    args: &ClockArgs,
    now: ClockStamp,
) -> Result<()> {
    let id = EmployeeId::new(args.id.as_str()).map_err(AttendanceError::from)?;
    let stamp = resolve_stamp(args.date.as_deref(), args.time.as_deref(), config, now)
        .map_err(AttendanceError::from)?;

    let event = ledger.record_entrance(registry, &id, stamp)?;
    tracing::debug!(event = %event.id, employee = %id, "entrance recorded");

    writeln!(
        writer,
        "Entrance recorded for {} on {} at {}",
        display_name(registry, &id),
        event.date.format(&config.date_format),
        event.time.format(&config.time_format)
    )?;
    Ok(())
}

/// Records an exit against the earliest open entrance of that day.
pub fn clock_out<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ledger: &mut Ledger,
    config: &Config,
    args: &ClockArgs,
    now: ClockStamp,
) -> Result<()> {
    let id = EmployeeId::new(args.id.as_str()).map_err(AttendanceError::from)?;
    let stamp = resolve_stamp(args.date.as_deref(), args.time.as_deref(), config, now)
        .map_err(AttendanceError::from)?;

    let event = ledger.record_exit(registry, &id, stamp)?;
    tracing::debug!(event = %event.id, closes = ?event.closes, employee = %id, "exit recorded");

    let entered = event
        .closes
        .and_then(|entrance| ledger.record(entrance))
        .map(|record| record.entrance.format(&config.time_format).to_string());

    write!(
        writer,
        "Exit recorded for {} on {} at {}",
        display_name(registry, &id),
        event.date.format(&config.date_format),
        event.time.format(&config.time_format)
    )?;
    match entered {
        Some(entered) => writeln!(writer, " (entered at {entered})")?,
        None => writeln!(writer)?,
    }
    Ok(())
}

/// Shows one employee's attendance records, optionally only the open ones.
pub fn history<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ledger: &Ledger,
    config: &Config,
    id: &str,
    open: bool,
    json: bool,
) -> Result<()> {
    let id = EmployeeId::new(id).map_err(AttendanceError::from)?;
    if !registry.exists(&id) {
        return Err(AttendanceError::UnknownEmployee { id }.into());
    }

    let records = if open {
        ledger.open_records(&id)
    } else {
        ledger.events_for(&id)
    };
    if json {
        writeln!(writer, "{}", records_json(registry, &records)?)?;
    } else if records.is_empty() {
        let kind = if open { "open attendance" } else { "attendance" };
        writeln!(writer, "No {kind} records for {}.", display_name(registry, &id))?;
    } else {
        write!(writer, "{}", format_records(registry, &records, config))?;
    }
    Ok(())
}

fn display_name(registry: &Registry, id: &EmployeeId) -> String {
    registry
        .get(id)
        .map_or_else(|| id.to_string(), |employee| format!("{} ({id})", employee.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveTime};
    use insta::assert_snapshot;
    use punch_core::NewEmployee;

    fn now() -> ClockStamp {
        ClockStamp::new(
            NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register(NewEmployee {
                id: "001".to_string(),
                name: "João".to_string(),
                age: 28,
                shift: "morning".to_string(),
            })
            .unwrap();
        registry
    }

    fn clock(id: &str, date: Option<&str>, time: Option<&str>) -> ClockArgs {
        ClockArgs {
            id: id.to_string(),
            date: date.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    fn error_kind(err: &anyhow::Error) -> &AttendanceError {
        err.downcast_ref::<AttendanceError>().unwrap()
    }

    #[test]
    fn in_then_out_closes_the_record() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let config = Config::default();
        let mut output = Vec::new();

        let args = clock("001", Some("28/11/2025"), Some("08:00"));
        clock_in(&mut output, &registry, &mut ledger, &config, &args, now()).unwrap();
        let args = clock("001", Some("28/11/2025"), Some("17:30"));
        clock_out(&mut output, &registry, &mut ledger, &config, &args, now()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Entrance recorded for João (001) on 28/11/2025 at 08:00
        Exit recorded for João (001) on 28/11/2025 at 17:30 (entered at 08:00)
        ");
    }

    #[test]
    fn missing_date_and_time_default_to_now() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let mut output = Vec::new();

        let args = clock("001", None, None);
        clock_in(&mut output, &registry, &mut ledger, &Config::default(), &args, now()).unwrap();

        let event = &ledger.events()[0];
        assert_eq!(event.date, now().date);
        assert_eq!(event.time, now().time);
    }

    #[test]
    fn unknown_employee_is_reported() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let mut output = Vec::new();

        let args = clock("999", Some("28/11/2025"), Some("08:00"));
        let err = clock_in(&mut output, &registry, &mut ledger, &Config::default(), &args, now())
            .unwrap_err();
        assert!(matches!(
            error_kind(&err),
            AttendanceError::UnknownEmployee { .. }
        ));
        assert!(ledger.is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn out_on_empty_ledger() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let mut output = Vec::new();

        let args = clock("001", Some("28/11/2025"), Some("17:30"));
        let err = clock_out(&mut output, &registry, &mut ledger, &Config::default(), &args, now())
            .unwrap_err();
        assert_eq!(error_kind(&err), &AttendanceError::EmptyLedger);
    }

    #[test]
    fn malformed_date_is_invalid_input() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let mut output = Vec::new();

        let args = clock("001", Some("2025-11-28"), None);
        let err = clock_in(&mut output, &registry, &mut ledger, &Config::default(), &args, now())
            .unwrap_err();
        assert!(matches!(error_kind(&err), AttendanceError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "invalid date '2025-11-28', expected format %d/%m/%Y"
        );
    }

    #[test]
    fn history_requires_registered_employee() {
        let registry = registry();
        let ledger = Ledger::new();
        let mut output = Vec::new();

        let config = Config::default();
        let err = history(&mut output, &registry, &ledger, &config, "999", false, false)
            .unwrap_err();
        assert_eq!(err.to_string(), "employee 999 is not registered");

        history(&mut output, &registry, &ledger, &config, "001", false, false).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No attendance records for João (001).\n"
        );
    }

    #[test]
    fn history_lists_open_and_closed_records() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let config = Config::default();
        let mut sink = Vec::new();

        for (command, time) in [("in", "08:00"), ("in", "09:00"), ("out", "12:00")] {
            let args = clock("001", Some("28/11/2025"), Some(time));
            if command == "in" {
                clock_in(&mut sink, &registry, &mut ledger, &config, &args, now()).unwrap();
            } else {
                clock_out(&mut sink, &registry, &mut ledger, &config, &args, now()).unwrap();
            }
        }

        let mut output = Vec::new();
        history(&mut output, &registry, &ledger, &config, "001", false, false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        ID          Name                      Date        Entrance  Exit
        001         João                      28/11/2025  08:00     12:00
        001         João                      28/11/2025  09:00     -
        ");

        let mut output = Vec::new();
        history(&mut output, &registry, &ledger, &config, "001", true, false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        ID          Name                      Date        Entrance  Exit
        001         João                      28/11/2025  09:00     -
        ");
    }

    #[test]
    fn open_history_without_open_records() {
        let registry = registry();
        let mut ledger = Ledger::new();
        let config = Config::default();
        let mut sink = Vec::new();

        let args = clock("001", Some("28/11/2025"), Some("08:00"));
        clock_in(&mut sink, &registry, &mut ledger, &config, &args, now()).unwrap();
        let args = clock("001", Some("28/11/2025"), Some("12:00"));
        clock_out(&mut sink, &registry, &mut ledger, &config, &args, now()).unwrap();

        let mut output = Vec::new();
        history(&mut output, &registry, &ledger, &config, "001", true, false).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No open attendance records for João (001).\n"
        );
    }
}
