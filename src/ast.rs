//! # Rule Language - Syntax Tree
//!
//! A rule combines attribute comparisons with `AND`/`OR` and parentheses:
//!
//! ```text
//! (age > 30 AND department = 'Sales') OR salary >= 50000
//! ```
//!
//! ## Submodules
//!
//! - **[tokens]** - tokens produced by the lexer
//! - **[operators]** - comparison and logical operators, literal types
//! - **[node]** - the compiled tree and its edit operations
//!
//! ## Grammar
//!
//! ```text
//! expr        := term ( (AND|OR) term )*
//! term        := comparison | '(' expr ')'
//! comparison  := STRING COMPARISON (NUMBER|STRING)
//! ```
//!
//! `AND` and `OR` share one precedence level and chain to the left, so
//! `a = 1 OR b = 2 AND c = 3` means `(a = 1 OR b = 2) AND c = 3`.
pub mod node;
pub mod operators;
pub mod tokens;

pub use node::{Branch, Comparison, Logical, Node};
pub use operators::{ComparisonOp, LiteralType, LogicalOp};
pub use tokens::{Token, TokenKind};
