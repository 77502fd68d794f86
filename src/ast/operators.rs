use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator of a comparison leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LessThan,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessEqual,
    /// Equal (`=`)
    #[serde(rename = "=")]
    Equal,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
        }
    }

    /// `true` for the four ordering operators, which coerce numeric operands.
    pub fn is_ordering(self) -> bool {
        !matches!(self, ComparisonOp::Equal | ComparisonOp::NotEqual)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(ComparisonOp::GreaterThan),
            "<" => Some(ComparisonOp::LessThan),
            ">=" => Some(ComparisonOp::GreaterEqual),
            "<=" => Some(ComparisonOp::LessEqual),
            "=" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean combinator of a logical node.
///
/// AND and OR bind equally tightly; grouping is only expressed with
/// parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for LogicalOp {
    type Err = String;

    /// Accepts the keyword in any case, or the `&&`/`||` symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" | "&&" => Ok(LogicalOp::And),
            "OR" | "||" => Ok(LogicalOp::Or),
            _ => Err(format!("unknown logical operator '{}', expected AND or OR", s)),
        }
    }
}

/// Declared type of a comparison literal, and therefore of its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LiteralType {
    Number,
    String,
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Number => f.write_str("NUMBER"),
            LiteralType::String => f.write_str("STRING"),
        }
    }
}
