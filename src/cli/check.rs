//! Compile a rule and optionally evaluate it against JSON input

use serde_json::json;

use super::{CliError, read_record};
use crate::{Engine, EvalOptions};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule to compile
    pub rule: String,
    /// JSON record to evaluate the rule against
    pub input: Option<String>,
    /// Only validate syntax, don't print or evaluate
    pub syntax_only: bool,
    /// Compare numeric attributes numerically under `=` and `!=`
    pub numeric_equality: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The rule compiled
    SyntaxValid,
    /// Document form of the compiled rule (no input given)
    Document(serde_json::Value),
    /// `{"result": bool}` for the given input
    Evaluated(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let engine = Engine::with_options(EvalOptions {
        numeric_equality: options.numeric_equality,
    });
    let rule = engine.parse(&options.rule)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    match options.input.as_deref() {
        None => Ok(CheckResult::Document(engine.serialize(&rule))),
        Some(input) => {
            let record = read_record(Some(input))?;
            let result = engine.evaluate(&rule, &record)?;
            Ok(CheckResult::Evaluated(json!({ "result": result })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleError;

    fn options(rule: &str, input: Option<&str>) -> CheckOptions {
        CheckOptions {
            rule: rule.to_string(),
            input: input.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_without_input_prints_document() {
        let result = execute_check(&options("age > 30", None)).unwrap();
        match result {
            CheckResult::Document(doc) => assert_eq!(doc["type"], "comparision"),
            other => panic!("expected document, got {:?}", other),
        }
    }

    #[test]
    fn test_check_evaluates_input() {
        let result = execute_check(&options(
            "age > 30 AND department = 'Sales'",
            Some(r#"{"age": 35, "department": "Sales"}"#),
        ))
        .unwrap();
        match result {
            CheckResult::Evaluated(out) => assert_eq!(out, json!({"result": true})),
            other => panic!("expected evaluation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_syntax_only() {
        let mut opts = options("age > 30", Some("not json"));
        opts.syntax_only = true;
        assert!(matches!(execute_check(&opts), Ok(CheckResult::SyntaxValid)));
    }

    #[test]
    fn test_check_reports_rule_errors() {
        let err = execute_check(&options("age >", None)).unwrap_err();
        assert!(matches!(err, CliError::Rule(RuleError::Syntax { .. })));

        let err = execute_check(&options("age > 30", Some(r#"{"age": [1]}"#))).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_check_numeric_equality_flag() {
        let mut opts = options("age = 30", Some(r#"{"age": 30}"#));
        let plain = execute_check(&opts).unwrap();
        assert!(matches!(plain, CheckResult::Evaluated(ref v) if v["result"] == false));

        opts.numeric_equality = true;
        let numeric = execute_check(&opts).unwrap();
        assert!(matches!(numeric, CheckResult::Evaluated(ref v) if v["result"] == true));
    }
}
