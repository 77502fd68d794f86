//! CLI support for rule-tree
//!
//! The binary is a thin shell over these functions so the same commands can
//! be driven from other tools or from tests.

mod check;
mod combine;
mod eval;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use combine::{CombineOptions, execute_combine};
pub use eval::{EvalDocumentOptions, execute_eval};

use std::io;

use crate::Record;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parse, combine or evaluation error
    Rule(crate::RuleError),
    /// Stored document could not be decoded
    Document(crate::DocumentError),
    /// Input record is not valid JSON or holds non-scalar values
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Rule(e) => write!(f, "{}", e),
            CliError::Document(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON input: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Rule(e) => Some(e),
            CliError::Document(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<crate::RuleError> for CliError {
    fn from(e: crate::RuleError) -> Self {
        CliError::Rule(e)
    }
}

impl From<crate::DocumentError> for CliError {
    fn from(e: crate::DocumentError) -> Self {
        CliError::Document(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Reads the evaluation record from JSON text.
fn read_record(input: Option<&str>) -> Result<Record, CliError> {
    let json = input.ok_or(CliError::NoInput)?;
    Ok(serde_json::from_str(json)?)
}
