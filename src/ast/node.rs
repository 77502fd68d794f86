use std::fmt;
use std::mem;

use crate::ast::{ComparisonOp, LiteralType, LogicalOp};
use crate::error::EditError;
use crate::lexer::{is_numeral, is_word};

/// One step of a path from the root of a tree to one of its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Left,
    Right,
}

/// Attribute test: `attribute operator literal`.
///
/// The literal is kept as written in the rule; `literal_type` records whether
/// it was lexed as a NUMBER or a STRING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    attribute: String,
    operator: ComparisonOp,
    literal: String,
    literal_type: LiteralType,
}

impl Comparison {
    pub(crate) fn new(
        attribute: impl Into<String>,
        operator: ComparisonOp,
        literal: impl Into<String>,
        literal_type: LiteralType,
    ) -> Self {
        Comparison {
            attribute: attribute.into(),
            operator,
            literal: literal.into(),
            literal_type,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> ComparisonOp {
        self.operator
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn literal_type(&self) -> LiteralType {
        self.literal_type
    }

    /// Leaf that owns no heap memory, swapped in while a tree is torn down.
    fn vacant() -> Self {
        Comparison {
            attribute: String::new(),
            operator: ComparisonOp::Equal,
            literal: String::new(),
            literal_type: LiteralType::String,
        }
    }
}

/// Boolean combination of two subtrees.
#[derive(Debug)]
pub struct Logical {
    left: Box<Node>,
    operator: LogicalOp,
    right: Box<Node>,
}

impl Logical {
    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn operator(&self) -> LogicalOp {
        self.operator
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    /// Moves logical children onto `pending`, leaving vacant leaves behind.
    fn detach_children(&mut self, pending: &mut Vec<Node>) {
        for child in [&mut self.left, &mut self.right] {
            if matches!(**child, Node::Logical(_)) {
                pending.push(mem::replace(child.as_mut(), Node::Comparison(Comparison::vacant())));
            }
        }
    }
}

// Chains produced by long rules or by `combine` are as deep as they are
// long; the default drop glue would recurse once per level.
impl Drop for Logical {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            if let Node::Logical(logical) = &mut node {
                logical.detach_children(&mut pending);
            }
        }
    }
}

/// A compiled rule.
///
/// Leaves are always [`Comparison`]s and inner nodes always [`Logical`]s with
/// exactly two children. Fields are only reachable through accessors; the
/// single supported mutation is replacing a leaf's operator or literal with
/// [`Node::set_operator`] and [`Node::set_literal`].
///
/// Dropping, cloning, comparing, rendering and evaluating a tree walk the
/// left spine in a loop, so long `AND`/`OR` chains cost heap, not stack.
/// Recursion only happens into right operands, whose depth is bounded by
/// the parenthesis nesting of the rule or of its stored document.
#[derive(Debug)]
pub enum Node {
    Comparison(Comparison),
    Logical(Logical),
}

impl Node {
    /// Joins two trees under a logical operator.
    pub fn logical(left: Node, operator: LogicalOp, right: Node) -> Node {
        Node::Logical(Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn as_comparison(&self) -> Option<&Comparison> {
        match self {
            Node::Comparison(c) => Some(c),
            Node::Logical(_) => None,
        }
    }

    pub fn as_logical(&self) -> Option<&Logical> {
        match self {
            Node::Logical(l) => Some(l),
            Node::Comparison(_) => None,
        }
    }

    /// Leftmost comparison plus the `(operator, right operand)` pairs above
    /// it, innermost first: the order in which a left-deep chain applies them.
    pub(crate) fn spine(&self) -> (&Comparison, Vec<(LogicalOp, &Node)>) {
        let mut rights = Vec::new();
        let mut node = self;
        loop {
            match node {
                Node::Comparison(c) => {
                    rights.reverse();
                    return (c, rights);
                }
                Node::Logical(l) => {
                    rights.push((l.operator, l.right.as_ref()));
                    node = l.left.as_ref();
                }
            }
        }
    }

    /// Follows `path` from this node. An empty path addresses the node itself.
    pub fn node_at(&self, path: &[Branch]) -> Option<&Node> {
        path.iter().try_fold(self, |node, branch| match (node, branch) {
            (Node::Logical(l), Branch::Left) => Some(l.left()),
            (Node::Logical(l), Branch::Right) => Some(l.right()),
            (Node::Comparison(_), _) => None,
        })
    }

    pub fn comparison_at(&self, path: &[Branch]) -> Option<&Comparison> {
        self.node_at(path).and_then(Node::as_comparison)
    }

    fn comparison_at_mut(&mut self, path: &[Branch]) -> Result<&mut Comparison, EditError> {
        let mut node = self;
        for branch in path {
            node = match (node, branch) {
                (Node::Logical(l), Branch::Left) => l.left.as_mut(),
                (Node::Logical(l), Branch::Right) => l.right.as_mut(),
                (Node::Comparison(_), _) => {
                    return Err(EditError::NoSuchNode {
                        path: path.to_vec(),
                    });
                }
            };
        }

        match node {
            Node::Comparison(c) => Ok(c),
            Node::Logical(_) => Err(EditError::NotAComparison {
                path: path.to_vec(),
            }),
        }
    }

    /// Replaces the operator of the comparison at `path`.
    pub fn set_operator(&mut self, path: &[Branch], operator: ComparisonOp) -> Result<(), EditError> {
        self.comparison_at_mut(path)?.operator = operator;
        Ok(())
    }

    /// Replaces the literal of the comparison at `path`.
    ///
    /// The literal keeps the leaf's declared type: NUMBER leaves only take
    /// numerals and STRING leaves only take single words, so the edited tree
    /// still renders to text that parses back to it.
    pub fn set_literal(&mut self, path: &[Branch], literal: impl Into<String>) -> Result<(), EditError> {
        let literal = literal.into();
        let comparison = self.comparison_at_mut(path)?;

        let fits = match comparison.literal_type {
            LiteralType::Number => is_numeral(&literal),
            LiteralType::String => is_word(&literal),
        };
        if !fits {
            return Err(EditError::LiteralMismatch {
                attribute: comparison.attribute.clone(),
                literal,
                expected: comparison.literal_type,
            });
        }

        comparison.literal = literal;
        Ok(())
    }

    /// Distinct attribute names, in order of first appearance.
    pub fn attributes(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Comparison(c) => {
                    if !names.contains(&c.attribute()) {
                        names.push(c.attribute());
                    }
                }
                Node::Logical(l) => {
                    pending.push(l.right.as_ref());
                    pending.push(l.left.as_ref());
                }
            }
        }
        names
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Comparison(_) => count += 1,
                Node::Logical(l) => {
                    pending.push(l.left.as_ref());
                    pending.push(l.right.as_ref());
                }
            }
        }
        count
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Node::Logical(l) = node {
                pending.push((l.left.as_ref(), depth + 1));
                pending.push((l.right.as_ref(), depth + 1));
            }
        }
        deepest
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let (leaf, rights) = self.spine();
        rights
            .into_iter()
            .fold(Node::Comparison(leaf.clone()), |acc, (operator, right)| {
                Node::logical(acc, operator, right.clone())
            })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Node::Comparison(a), Node::Comparison(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Node::Logical(a), Node::Logical(b)) => {
                    if a.operator != b.operator {
                        return false;
                    }
                    pending.push((a.left.as_ref(), b.left.as_ref()));
                    pending.push((a.right.as_ref(), b.right.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Node {}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal_type {
            LiteralType::Number => write!(f, "{} {} {}", self.attribute, self.operator, self.literal),
            LiteralType::String => write!(f, "{} {} '{}'", self.attribute, self.operator, self.literal),
        }
    }
}

/// Renders the tree as rule text.
///
/// Chains are left-deep, so only a logical right operand needs parentheses
/// for the text to parse back to the same shape.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (leaf, rights) = self.spine();
        fmt::Display::fmt(leaf, f)?;
        for (operator, right) in rights {
            write!(f, " {} ", operator)?;
            match right {
                Node::Logical(_) => write!(f, "({})", right)?,
                Node::Comparison(c) => fmt::Display::fmt(c, f)?,
            }
        }
        Ok(())
    }
}
