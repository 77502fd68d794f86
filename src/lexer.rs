use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Token, TokenKind};
use crate::error::{Result, RuleError};

/// Raw substrings, in priority order: numerals, two-character operators,
/// single-character operators and parentheses, word runs, then any other
/// non-whitespace character (judged by the lexer).
///
/// The fractional dot is a literal dot. With a wildcard there, `3-5` and
/// `3x5` would each be one raw substring (`3-5` then rejected as an invalid
/// token); here `3-5` splits into the numerals `3` and `-5`, and `3x5` is a
/// word.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+(?:\.[0-9]+)?\b|<=|>=|!=|==|&&|\|\||[()<>=]|\w+|[^\s\w]")
        .expect("token pattern is valid")
});

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").expect("numeral pattern is valid"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").expect("word pattern is valid"));

/// Splits rule text into raw lexical substrings. Whitespace only separates.
pub fn tokenize(rule: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(rule)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `true` if `s` is a NUMBER literal: optional minus, digits, optional
/// fractional part.
pub fn is_numeral(s: &str) -> bool {
    NUMERAL.is_match(s)
}

/// `true` if `s` is a single run of letters, digits or underscores.
pub fn is_word(s: &str) -> bool {
    WORD.is_match(s)
}

fn is_quote(s: &str) -> bool {
    s == "'" || s == "\""
}

/// Pull-based classifier over the tokenizer output.
///
/// The cursor moves over raw substrings, not characters; positions reported
/// in [`RuleError::InvalidToken`] are indices into [`Lexer::raw_tokens`].
pub struct Lexer {
    tokens: Vec<String>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            tokens: tokenize(input),
            position: 0,
        }
    }

    pub fn raw_tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Moves the cursor back to the first substring.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Classifies the next substring. Returns an `Eof` token on every call
    /// once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        let Some(current) = self.tokens.get(self.position).cloned() else {
            return Ok(Token::eof());
        };
        let position = self.position;
        self.position += 1;

        let token = match current.as_str() {
            "AND" | "&&" => Token::new(TokenKind::And, "AND"),
            "OR" | "||" => Token::new(TokenKind::Or, "OR"),
            s @ (">" | "<" | ">=" | "<=" | "=" | "!=") => Token::new(TokenKind::Comparison, s),
            "(" => Token::new(TokenKind::LParen, "("),
            ")" => Token::new(TokenKind::RParen, ")"),
            s if is_numeral(s) => Token::new(TokenKind::Number, s),
            s if is_quote(s) => self.read_quoted(s, position)?,
            s if is_word(s) => Token::new(TokenKind::String, s),
            _ => {
                return Err(RuleError::InvalidToken {
                    token: current.clone(),
                    position,
                });
            }
        };

        trace!(position, token = %token, "lexed token");
        Ok(token)
    }

    /// `'word'` arrives as three substrings: quote, word, quote.
    fn read_quoted(&mut self, quote: &str, position: usize) -> Result<Token> {
        let closed = self
            .tokens
            .get(position + 2)
            .is_some_and(|closing| closing == quote);
        if !closed {
            return Err(RuleError::InvalidToken {
                token: quote.to_string(),
                position,
            });
        }

        let inner = &self.tokens[position + 1];
        if !is_word(inner) {
            return Err(RuleError::InvalidToken {
                token: inner.clone(),
                position: position + 1,
            });
        }

        let token = Token::new(TokenKind::String, inner.clone());
        self.position = position + 3;
        Ok(token)
    }
}

#[test]
fn test_tokenize_rule() {
    let tokens = tokenize("(age > 30 OR department = 'Sales') AND age < 25");
    assert_eq!(
        tokens,
        vec![
            "(", "age", ">", "30", "OR", "department", "=", "'", "Sales", "'", ")", "AND", "age",
            "<", "25"
        ]
    );
}

#[test]
fn test_lexer_keeps_returning_eof() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::String);
    assert_eq!(lexer.next_token().unwrap(), Token::eof());
    assert_eq!(lexer.next_token().unwrap(), Token::eof());
}
