//! Error types for compiling, evaluating, decoding and editing rules.

use thiserror::Error;

use crate::ast::{Branch, LiteralType, TokenKind};

/// Failure of a parse, combine or evaluate call.
///
/// The display strings start with the kind name (`SyntaxError`,
/// `InvalidToken`, `TypeError`, `InsufficientDataError`) so that callers
/// presenting them to users can rely on a stable prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Grammar violation
    #[error("SyntaxError: expected {expected} but got {found} with value '{value}'")]
    Syntax {
        expected: TokenKind,
        found: TokenKind,
        value: String,
    },

    /// Raw substring that is not a valid token, with its index in the
    /// tokenizer output
    #[error("InvalidToken: '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },

    /// Inconsistent attribute types at parse time, or a value that cannot be
    /// compared numerically at evaluation time
    #[error("TypeError: cannot compare {value} with {reference}, attribute: {attribute}")]
    Type {
        attribute: String,
        value: String,
        reference: String,
    },

    /// Attribute referenced by a comparison is missing from the record
    #[error("InsufficientDataError: {attribute} attribute is not present in provided data")]
    InsufficientData { attribute: String },

    /// `combine` was called without any rule
    #[error("cannot combine an empty list of rules")]
    EmptyRuleSet,
}

pub type Result<T> = std::result::Result<T, RuleError>;

/// Failure to turn a stored document back into a tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Missing field, unknown `type` discriminator or wrong value kind
    #[error("malformed rule document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(
        "malformed rule document: attribute '{attribute}' is NUMBER but its literal '{literal}' is not a numeral"
    )]
    NonNumericLiteral { attribute: String, literal: String },

    /// Attribute name or STRING literal that the lexer would not read as one
    /// word
    #[error("malformed rule document: {field} '{value}' is not a single word")]
    InvalidWord { field: &'static str, value: String },
}

/// Rejected in-place edit of a comparison leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node at path {path:?}")]
    NoSuchNode { path: Vec<Branch> },

    #[error("node at path {path:?} is a logical node, only comparisons can be edited")]
    NotAComparison { path: Vec<Branch> },

    #[error("literal '{literal}' is not a valid {expected} literal for attribute '{attribute}'")]
    LiteralMismatch {
        attribute: String,
        literal: String,
        expected: LiteralType,
    },
}
