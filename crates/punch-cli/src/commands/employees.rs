//! Employee registration and listing.

use std::io::Write;

use anyhow::Result;
use punch_core::{NewEmployee, Registry};

use super::util::truncate_name;
use crate::cli::RegisterArgs;

/// Registers an employee and confirms it.
pub fn register<W: Write>(
    writer: &mut W,
    registry: &mut Registry,
    args: &RegisterArgs,
) -> Result<()> {
    let employee = registry.register(NewEmployee {
        id: args.id.clone(),
        name: args.name.clone(),
        age: args.age,
        shift: args.shift.clone(),
    })?;
    tracing::debug!(id = %employee.id, shift = %employee.shift, "employee registered");
    writeln!(
        writer,
        "Registered {} ({}), {} shift",
        employee.name, employee.id, employee.shift
    )?;
    Ok(())
}

/// Formats the employee table.
pub fn format_employees(registry: &Registry) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    if registry.is_empty() {
        writeln!(output, "No employees registered.").unwrap();
        return output;
    }

    writeln!(output, "{:<10}  {:<24}  {:>3}  Shift", "ID", "Name", "Age").unwrap();
    for employee in registry.iter() {
        writeln!(
            output,
            "{:<10}  {:<24}  {:>3}  {}",
            employee.id.as_str(),
            truncate_name(&employee.name),
            employee.age,
            employee.shift
        )
        .unwrap();
    }
    output
}

/// Lists employees in registration order.
pub fn list<W: Write>(writer: &mut W, registry: &Registry, json: bool) -> Result<()> {
    if json {
        let employees: Vec<_> = registry.iter().collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&employees)?)?;
    } else {
        write!(writer, "{}", format_employees(registry))?;
    }
    Ok(())
}
