//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::domain::ValidationResult;
use crate::infrastructure::{InfraError, InfraResult};

pub const FAILED_HEADER: &str = "Validation failed. Errors:";
pub const SUCCESS_LINE: &str = "Validation successful!";

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Plain text lines for a result: header, then one `path: message` per failure.
pub fn result_lines(result: &ValidationResult) -> Vec<String> {
    if result.is_valid() {
        return vec![SUCCESS_LINE.to_string()];
    }
    std::iter::once(FAILED_HEADER.to_string())
        .chain(result.failures().iter().map(|f| f.to_string()))
        .collect()
}

/// Print a result as text.
pub fn text_report(result: &ValidationResult) {
    if result.is_valid() {
        println!("{}", SUCCESS_LINE.green());
        return;
    }
    println!("{}", FAILED_HEADER.red().bold());
    for line in result_lines(result).iter().skip(1) {
        info(line);
    }
}

/// One document in `check --format json` output. `result` has the same
/// shape `demo --format json` prints.
#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub path: PathBuf,
    pub result: ValidationResult,
}

/// Print a value as pretty JSON on stdout.
pub fn json(value: &impl Serialize) -> InfraResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(|e| InfraError::io("write json report", e.into()))?;
    writeln!(stdout).map_err(|e| InfraError::io("write json report", e))
}
