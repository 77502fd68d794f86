use tracing::trace;

use crate::{
    ast::{Comparison, ComparisonOp, LiteralType, LogicalOp, Node},
    error::{Result, RuleError},
    registry::TypeRegistry,
    value::{Record, Value},
};

/// Knobs for evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Compare NUMBER attributes numerically under `=` and `!=` too.
    ///
    /// Off by default: equality then compares the supplied value with the
    /// literal text as-is, so `age = 30` never matches `{"age": 30}`. The
    /// four ordering operators always compare numerically.
    pub numeric_equality: bool,
}

/// Evaluates compiled rules against records.
///
/// The declared type of each attribute is read from the registry; attributes
/// the registry has never seen (trees decoded from storage, say) fall back to
/// the leaf's own literal type.
pub struct Evaluator<'r> {
    registry: &'r TypeRegistry,
    options: EvalOptions,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, EvalOptions::default())
    }

    pub fn with_options(registry: &'r TypeRegistry, options: EvalOptions) -> Self {
        Evaluator { registry, options }
    }

    /// Evaluates `node` against `data`.
    ///
    /// `AND` stops at a false left operand and `OR` at a true one; the right
    /// subtree is then never visited, so attributes it needs may be missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use rule_tree::{parse, Evaluator, Record, TypeRegistry, Value};
    ///
    /// let registry = TypeRegistry::new();
    /// let rule = parse("x > 1 AND y > 2", &registry).unwrap();
    ///
    /// let mut data = Record::new();
    /// data.insert("x".to_string(), Value::Integer(0));
    ///
    /// let evaluator = Evaluator::new(&registry);
    /// assert_eq!(evaluator.evaluate(&rule, &data), Ok(false));
    /// ```
    pub fn evaluate(&self, node: &Node, data: &Record) -> Result<bool> {
        let (leaf, rights) = node.spine();
        let mut result = self.eval_comparison(leaf, data)?;

        for (operator, right) in rights {
            match (operator, result) {
                (LogicalOp::And, false) | (LogicalOp::Or, true) => {
                    trace!(%operator, result, "short-circuit");
                }
                _ => result = self.evaluate(right, data)?,
            }
        }
        Ok(result)
    }

    fn eval_comparison(&self, comparison: &Comparison, data: &Record) -> Result<bool> {
        let attribute = comparison.attribute();
        let value = data
            .get(attribute)
            .ok_or_else(|| RuleError::InsufficientData {
                attribute: attribute.to_string(),
            })?;

        let declared = self
            .registry
            .get(attribute)
            .unwrap_or(comparison.literal_type());

        match declared {
            LiteralType::Number => self.compare_numeric(comparison, value),
            LiteralType::String => Ok(compare_text(comparison, value)),
        }
    }

    fn compare_numeric(&self, comparison: &Comparison, value: &Value) -> Result<bool> {
        let type_error = || RuleError::Type {
            attribute: comparison.attribute().to_string(),
            value: value.to_string(),
            reference: comparison.literal().to_string(),
        };

        let actual = value.as_float().ok_or_else(type_error)?;
        let operator = comparison.operator();

        if !operator.is_ordering() && !self.options.numeric_equality {
            return Ok(literal_equality(operator, value, comparison.literal()));
        }

        let expected: f64 = comparison.literal().parse().map_err(|_| type_error())?;
        Ok(match operator {
            ComparisonOp::GreaterThan => actual > expected,
            ComparisonOp::GreaterEqual => actual >= expected,
            ComparisonOp::LessThan => actual < expected,
            ComparisonOp::LessEqual => actual <= expected,
            ComparisonOp::Equal => actual == expected,
            ComparisonOp::NotEqual => actual != expected,
        })
    }
}

/// STRING attributes: `=`/`!=` compare the raw value with the literal, the
/// ordering operators never match.
fn compare_text(comparison: &Comparison, value: &Value) -> bool {
    match comparison.operator() {
        op @ (ComparisonOp::Equal | ComparisonOp::NotEqual) => {
            literal_equality(op, value, comparison.literal())
        }
        _ => false,
    }
}

/// Equality without coercion: only a string value can equal the literal.
fn literal_equality(operator: ComparisonOp, value: &Value, literal: &str) -> bool {
    let equal = value.as_str() == Some(literal);
    match operator {
        ComparisonOp::NotEqual => !equal,
        _ => equal,
    }
}

/// Evaluates `node` with default options.
pub fn evaluate(node: &Node, data: &Record, registry: &TypeRegistry) -> Result<bool> {
    Evaluator::new(registry).evaluate(node, data)
}
