//! Evaluate a stored rule document against JSON input

use serde_json::json;

use super::{CliError, read_record};
use crate::{Engine, EvalOptions};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalDocumentOptions {
    /// Rule document, as produced by `check` or `combine`
    pub document: String,
    /// JSON record to evaluate against
    pub input: Option<String>,
    /// Compare numeric attributes numerically under `=` and `!=`
    pub numeric_equality: bool,
}

/// Decode the document and evaluate it, returning `{"result": bool}`
pub fn execute_eval(options: &EvalDocumentOptions) -> Result<serde_json::Value, CliError> {
    let engine = Engine::with_options(EvalOptions {
        numeric_equality: options.numeric_equality,
    });
    let rule = crate::from_json(&options.document)?;
    let record = read_record(options.input.as_deref())?;
    let result = engine.evaluate(&rule, &record)?;
    Ok(json!({ "result": result }))
}
