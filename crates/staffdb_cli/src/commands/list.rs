//! List command implementation.

use crate::error::CliError;
use crate::OutputFormat;
use serde::Serialize;
use staffdb_core::{Database, Employee};
use std::fmt::Write;

/// One employee as shown to the user.
#[derive(Debug, Serialize)]
pub struct EmployeeListing {
    /// Position in the file, used as the employee ID.
    pub id: usize,
    /// Employee name.
    pub name: String,
    /// Employee address.
    pub address: String,
    /// Hours worked.
    pub hours: u32,
}

impl EmployeeListing {
    fn new(id: usize, employee: &Employee) -> Self {
        Self {
            id,
            name: employee.name_str().into_owned(),
            address: employee.address_str().into_owned(),
            hours: employee.hours,
        }
    }
}

/// Runs the list command.
pub fn run(db: &Database, format: OutputFormat) -> Result<(), CliError> {
    let output = render(db.employees(), format)?;
    print!("{output}");
    Ok(())
}

fn render(employees: &[Employee], format: OutputFormat) -> Result<String, CliError> {
    let listings: Vec<EmployeeListing> = employees
        .iter()
        .enumerate()
        .map(|(id, employee)| EmployeeListing::new(id, employee))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&listings)? + "\n"),
        OutputFormat::Text => Ok(render_text(&listings)),
    }
}

fn render_text(listings: &[EmployeeListing]) -> String {
    let mut out = String::new();
    for listing in listings {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Employee {}", listing.id);
        let _ = writeln!(out, "\tName: {}", listing.name);
        let _ = writeln!(out, "\tAddress: {}", listing.address);
        let _ = writeln!(out, "\tHours: {}", listing.hours);
    }
    out
}
