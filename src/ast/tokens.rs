use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeral with an optional minus sign and an optional fractional part
    ///
    /// # Examples
    /// ```text
    /// 30
    /// -12
    /// 5000.75
    /// ```
    Number,

    /// Bare word or quoted word
    ///
    /// Used both for attribute names and for string literals, the parser
    /// decides which from the position in the comparison.
    ///
    /// # Examples
    /// ```text
    /// age
    /// 'Sales'
    /// ```
    String,

    /// Left parenthesis
    LParen,

    /// Right parenthesis
    RParen,

    /// Logical AND (`AND` or `&&`)
    And,

    /// Logical OR (`OR` or `||`)
    Or,

    /// One of `>`, `<`, `>=`, `<=`, `=`, `!=`
    Comparison,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Comparison => "COMPARISON",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A classified token: its kind plus the literal text it stands for.
///
/// Logical tokens carry their canonical spelling (`AND`/`OR`) no matter
/// which form appeared in the source, quoted strings carry the inner word
/// and `Eof` carries an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {:?})", self.kind, self.value)
    }
}
