pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod serializer;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Branch, Comparison, ComparisonOp, LiteralType, Logical, LogicalOp, Node, Token, TokenKind};
pub use engine::Engine;
pub use error::{DocumentError, EditError, RuleError};
pub use evaluator::{EvalOptions, Evaluator, evaluate};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, combine, parse};
pub use registry::TypeRegistry;
pub use serializer::{deserialize, from_json, serialize, to_json, to_json_pretty};
pub use value::{Record, Value};
