//! Fold several rules into one tree

use super::CliError;
use crate::{Engine, LogicalOp};

/// Options for the combine command
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Rules, combined left to right
    pub rules: Vec<String>,
    /// Operator joining consecutive rules
    pub operator: LogicalOp,
}

/// Combine the rules and return the document form of the result
pub fn execute_combine(options: &CombineOptions) -> Result<serde_json::Value, CliError> {
    let engine = Engine::new();
    let combined = engine.combine(options.rules.as_slice(), options.operator)?;
    Ok(engine.serialize(&combined))
}
