//! Shared utilities for console commands.

use anyhow::bail;
use chrono::{NaiveDate, NaiveTime};
use punch_core::{ClockStamp, ValidationError};

use crate::Config;

/// Splits a console line into arguments.
///
/// Arguments are separated by whitespace; double quotes group words, so
/// `register 001 "Ana Lima" 30 night` yields four arguments after the command.
pub fn split_line(line: &str) -> anyhow::Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_arg = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_arg = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_arg {
                    args.push(std::mem::take(&mut current));
                    has_arg = false;
                }
            }
            c => {
                current.push(c);
                has_arg = true;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quote in: {line}");
    }
    if has_arg {
        args.push(current);
    }
    Ok(args)
}

/// Width of the name column in console tables.
pub const NAME_WIDTH: usize = 24;

/// Shortens a name to fit the name column, ending it with `...`.
///
/// Truncates by characters, not bytes, to avoid panics on multi-byte UTF-8.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        format!("{}...", name.chars().take(NAME_WIDTH - 3).collect::<String>())
    } else {
        name.to_string()
    }
}

/// Parses a date typed at the console with the configured format.
pub fn parse_date(s: &str, format: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), format).map_err(|_| ValidationError::InvalidDate {
        value: s.to_string(),
        format: format.to_string(),
    })
}

/// Parses a time of day typed at the console with the configured format.
pub fn parse_time(s: &str, format: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), format).map_err(|_| ValidationError::InvalidTime {
        value: s.to_string(),
        format: format.to_string(),
    })
}

/// Resolves optional console date/time arguments into a stamp.
///
/// Missing parts are taken from `now`, which the caller reads once per command.
pub fn resolve_stamp(
    date: Option<&str>,
    time: Option<&str>,
    config: &Config,
    now: ClockStamp,
) -> Result<ClockStamp, ValidationError> {
    let date = match date {
        Some(s) => parse_date(s, &config.date_format)?,
        None => now.date,
    };
    let time = match time {
        Some(s) => parse_time(s, &config.time_format)?,
        None => now.time,
    };
    Ok(ClockStamp::new(date, time))
}
