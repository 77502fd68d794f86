//! Tree <-> document conversion for persisting compiled rules.
//!
//! Every node becomes an object with five fields:
//!
//! | field      | comparison leaf               | logical node          |
//! |------------|-------------------------------|-----------------------|
//! | `type`     | `"comparision"`               | `"operator"`          |
//! | `op`       | `">"`, `"<="`, `"="`, ...     | `"AND"` / `"OR"`      |
//! | `attrType` | `"NUMBER"` / `"STRING"`       | `null`                |
//! | `left`     | attribute name                | left child document   |
//! | `right`    | literal text                  | right child document  |
//!
//! The `"comparision"` spelling is the stored discriminator and is kept as-is
//! so existing documents stay readable.
//!
//! # Examples
//!
//! ```
//! use rule_tree::{parse, TypeRegistry};
//! use rule_tree::serializer::{from_json, to_json};
//!
//! let registry = TypeRegistry::new();
//! let rule = parse("age > 30", &registry).unwrap();
//!
//! let text = to_json(&rule);
//! assert_eq!(
//!     text,
//!     r#"{"attrType":"NUMBER","left":"age","op":">","right":"30","type":"comparision"}"#
//! );
//! assert_eq!(from_json(&text).unwrap(), rule);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::{
    ast::{Comparison, ComparisonOp, LiteralType, LogicalOp, Node},
    error::DocumentError,
    lexer::{is_numeral, is_word},
};

const COMPARISON_TAG: &str = "comparision";
const OPERATOR_TAG: &str = "operator";

/// Deepest object nesting a document may have, whether it arrives as a
/// value or as text. Kept below `serde_json`'s own recursion limit so both
/// paths reject the same documents.
pub const MAX_DOCUMENT_DEPTH: usize = 100;

/// Converts a tree to its document form.
pub fn serialize(node: &Node) -> serde_json::Value {
    let (leaf, rights) = node.spine();
    rights
        .into_iter()
        .fold(comparison_document(leaf), |left, (operator, right)| {
            json!({
                "type": OPERATOR_TAG,
                "op": operator,
                "attrType": null,
                "left": left,
                "right": serialize(right),
            })
        })
}

fn comparison_document(c: &Comparison) -> serde_json::Value {
    json!({
        "type": COMPARISON_TAG,
        "op": c.operator(),
        "attrType": c.literal_type(),
        "left": c.attribute(),
        "right": c.literal(),
    })
}

/// Rebuilds a tree from its document form.
///
/// # Errors
///
/// [`DocumentError::Malformed`] for a missing field, an unknown `type`, an
/// unknown operator, a scalar where a nested document is required (and the
/// reverse) or nesting deeper than [`MAX_DOCUMENT_DEPTH`];
/// [`DocumentError::NonNumericLiteral`] for a NUMBER leaf whose literal is
/// not a numeral; [`DocumentError::InvalidWord`] for an attribute name or
/// STRING literal that is not a single word.
pub fn deserialize(document: &serde_json::Value) -> Result<Node, DocumentError> {
    if nesting_exceeds(document, MAX_DOCUMENT_DEPTH) {
        return Err(DocumentError::Malformed(serde::de::Error::custom(format!(
            "document nested deeper than {} levels",
            MAX_DOCUMENT_DEPTH
        ))));
    }
    NodeDocument::deserialize(document)?.into_node()
}

/// Compact JSON text of a tree, keys sorted.
pub fn to_json(node: &Node) -> String {
    serialize(node).to_string()
}

/// Indented JSON text of a tree, keys sorted.
pub fn to_json_pretty(node: &Node) -> String {
    format!("{:#}", serialize(node))
}

/// Parses JSON text produced by [`to_json`] or [`to_json_pretty`].
pub fn from_json(text: &str) -> Result<Node, DocumentError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    deserialize(&document)
}

/// Wire shape of a node; `type` selects how `left`/`right` are read.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum NodeDocument {
    #[serde(rename = "comparision")]
    Comparison {
        op: ComparisonOp,
        #[serde(rename = "attrType")]
        attr_type: LiteralType,
        left: String,
        #[serde(deserialize_with = "literal_text")]
        right: String,
    },
    #[serde(rename = "operator")]
    Operator {
        op: LogicalOp,
        left: Box<NodeDocument>,
        right: Box<NodeDocument>,
    },
}

impl NodeDocument {
    fn into_node(self) -> Result<Node, DocumentError> {
        match self {
            NodeDocument::Comparison {
                op,
                attr_type,
                left,
                right,
            } => {
                if !is_word(&left) {
                    return Err(DocumentError::InvalidWord {
                        field: "left",
                        value: left,
                    });
                }
                if attr_type == LiteralType::String && !is_word(&right) {
                    return Err(DocumentError::InvalidWord {
                        field: "right",
                        value: right,
                    });
                }
                if attr_type == LiteralType::Number && !is_numeral(&right) {
                    return Err(DocumentError::NonNumericLiteral {
                        attribute: left,
                        literal: right,
                    });
                }
                Ok(Node::Comparison(Comparison::new(left, op, right, attr_type)))
            }
            NodeDocument::Operator { op, left, right } => Ok(Node::logical(
                left.into_node()?,
                op,
                right.into_node()?,
            )),
        }
    }
}

/// Literals are stored as text; a bare JSON number is accepted and kept as
/// its decimal text.
fn literal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Literal::deserialize(deserializer)? {
        Literal::Text(text) => text,
        Literal::Number(n) => n.to_string(),
    })
}

/// Walks every object and array in `document` without recursing.
fn nesting_exceeds(document: &serde_json::Value, limit: usize) -> bool {
    let mut pending = vec![(document, 1)];
    while let Some((value, depth)) = pending.pop() {
        let children: Vec<&serde_json::Value> = match value {
            serde_json::Value::Object(map) => map.values().collect(),
            serde_json::Value::Array(items) => items.iter().collect(),
            _ => continue,
        };
        if depth > limit {
            return true;
        }
        pending.extend(children.into_iter().map(|child| (child, depth + 1)));
    }
    false
}
