use std::mem;

use tracing::debug;

use crate::{
    ast::{Comparison, ComparisonOp, LiteralType, LogicalOp, Node, Token, TokenKind},
    error::{Result, RuleError},
    lexer::Lexer,
    registry::TypeRegistry,
};

/// Deepest parenthesis nesting a rule may use.
pub const MAX_NESTING: usize = 64;

/// Recursive-descent parser over a [`Lexer`].
///
/// Every comparison it reads is checked against, and recorded in, the
/// borrowed [`TypeRegistry`].
pub struct Parser<'r> {
    lexer: Lexer,
    current_token: Token,
    registry: &'r TypeRegistry,
    nesting: usize,
}

impl<'r> Parser<'r> {
    pub fn new(mut lexer: Lexer, registry: &'r TypeRegistry) -> Result<Self> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            registry,
            nesting: 0,
        })
    }

    fn advance(&mut self) -> Result<()> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn unexpected(&self, expected: TokenKind) -> RuleError {
        RuleError::Syntax {
            expected,
            found: self.current_token.kind,
            value: self.current_token.value.clone(),
        }
    }

    /// Moves past the current token if it has the `expected` kind and hands
    /// it back.
    fn consume(&mut self, expected: TokenKind) -> Result<Token> {
        if !self.check(expected) {
            return Err(self.unexpected(expected));
        }
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    /// comparison := STRING COMPARISON (NUMBER|STRING)
    fn comparison(&mut self) -> Result<Node> {
        let attribute = self.consume(TokenKind::String)?.value;

        let op_token = self.consume(TokenKind::Comparison)?;
        let operator = ComparisonOp::from_symbol(&op_token.value).ok_or(RuleError::Syntax {
            expected: TokenKind::Comparison,
            found: op_token.kind,
            value: op_token.value.clone(),
        })?;

        let literal_type = if self.check(TokenKind::Number) {
            LiteralType::Number
        } else {
            LiteralType::String
        };
        let literal = match literal_type {
            LiteralType::Number => self.consume(TokenKind::Number)?,
            LiteralType::String => self.consume(TokenKind::String)?,
        }
        .value;

        self.registry.declare(&attribute, literal_type)?;

        Ok(Node::Comparison(Comparison::new(
            attribute,
            operator,
            literal,
            literal_type,
        )))
    }

    /// term := comparison | '(' expr ')'
    fn term(&mut self) -> Result<Node> {
        match self.current_token.kind {
            TokenKind::LParen => {
                if self.nesting >= MAX_NESTING {
                    debug!(limit = MAX_NESTING, "parenthesis nesting too deep");
                    return Err(self.unexpected(TokenKind::String));
                }
                self.nesting += 1;
                self.advance()?;
                let node = self.parse_expression()?;
                self.consume(TokenKind::RParen)?;
                self.nesting -= 1;
                Ok(node)
            }
            TokenKind::String => self.comparison(),
            // A term has to open with an attribute name or a parenthesis.
            _ => Err(self.unexpected(TokenKind::String)),
        }
    }

    /// expr := term ((AND|OR) term)*
    ///
    /// Both operators share one precedence level and fold to the left.
    pub fn parse_expression(&mut self) -> Result<Node> {
        let mut node = self.term()?;

        loop {
            let operator = match self.current_token.kind {
                TokenKind::And => LogicalOp::And,
                TokenKind::Or => LogicalOp::Or,
                _ => break,
            };

            self.advance()?;
            let right = self.term()?;
            node = Node::logical(node, operator, right);
        }
        Ok(node)
    }

    /// Parses a whole rule; anything left after the expression is an error.
    pub fn parse(&mut self) -> Result<Node> {
        let node = self.parse_expression()?;
        self.consume(TokenKind::Eof)?;
        Ok(node)
    }
}

/// Compiles one rule against `registry`.
///
/// # Examples
///
/// ```
/// use rule_tree::{parse, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// let rule = parse("age > 30 AND department = 'Sales'", &registry).unwrap();
/// assert_eq!(rule.leaf_count(), 2);
/// ```
pub fn parse(rule: &str, registry: &TypeRegistry) -> Result<Node> {
    debug!(rule, "parsing rule");
    Parser::new(Lexer::new(rule), registry)?.parse()
}

/// Parses every rule on its own and folds the trees left to right under
/// `operator`: `[a, b, c]` becomes `((a op b) op c)`.
///
/// The rules only share `registry`, so an attribute must keep one type
/// across all of them.
///
/// # Errors
///
/// [`RuleError::EmptyRuleSet`] for an empty slice, or the first parse error.
pub fn combine<S: AsRef<str>>(
    rules: &[S],
    operator: LogicalOp,
    registry: &TypeRegistry,
) -> Result<Node> {
    debug!(count = rules.len(), %operator, "combining rules");

    let (first, rest) = rules.split_first().ok_or(RuleError::EmptyRuleSet)?;
    let mut combined = parse(first.as_ref(), registry)?;

    for rule in rest {
        let next = parse(rule.as_ref(), registry)?;
        combined = Node::logical(combined, operator, next);
    }
    Ok(combined)
}
