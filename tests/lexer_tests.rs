// tests/lexer_tests.rs

use rule_tree::ast::{Token, TokenKind};
use rule_tree::error::RuleError;
use rule_tree::lexer::{Lexer, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input);
    let mut kinds = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token.kind == TokenKind::Eof {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[test]
fn test_tokenize_splits_operators_without_spaces() {
    assert_eq!(tokenize("age>=30"), vec!["age", ">=", "30"]);
    assert_eq!(tokenize("a!=b"), vec!["a", "!=", "b"]);
    assert_eq!(tokenize("(x<1)||(y>2)"), vec!["(", "x", "<", "1", ")", "||", "(", "y", ">", "2", ")"]);
    assert_eq!(tokenize("x=1&&y=2"), vec!["x", "=", "1", "&&", "y", "=", "2"]);
}

#[test]
fn test_tokenize_keeps_double_equals_together() {
    assert_eq!(tokenize("a == 1"), vec!["a", "==", "1"]);
}

#[test]
fn test_tokenize_numerals() {
    assert_eq!(tokenize("salary > 50000.75"), vec!["salary", ">", "50000.75"]);
    assert_eq!(tokenize("t > -5"), vec!["t", ">", "-5"]);
    assert_eq!(tokenize("pi < 3.14159"), vec!["pi", "<", "3.14159"]);
}

#[test]
fn test_tokenize_digits_followed_by_letters_form_one_word() {
    assert_eq!(tokenize("code = 30abc"), vec!["code", "=", "30abc"]);
}

#[test]
fn test_numeral_dot_is_literal() {
    assert_eq!(tokenize("a > 3-5"), vec!["a", ">", "3", "-5"]);
    assert_eq!(kinds("3.5 3x5 3-5"), vec![
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::Number
    ]);
}

#[test]
fn test_tokenize_catch_all_characters() {
    assert_eq!(tokenize("a @ b"), vec!["a", "@", "b"]);
    assert_eq!(tokenize("'Sales'"), vec!["'", "Sales", "'"]);
}

#[test]
fn test_tokenize_ignores_whitespace() {
    assert_eq!(tokenize("  \t\n "), Vec::<String>::new());
    assert_eq!(tokenize(" age\t>\n30 "), vec!["age", ">", "30"]);
}

// ============================================================================
// Lexer classification
// ============================================================================

#[test]
fn test_lexer_sequence() {
    let mut lexer = Lexer::new("(age > 30 OR department = 'Sales') AND age < 25");

    let expected = vec![
        Token::new(TokenKind::LParen, "("),
        Token::new(TokenKind::String, "age"),
        Token::new(TokenKind::Comparison, ">"),
        Token::new(TokenKind::Number, "30"),
        Token::new(TokenKind::Or, "OR"),
        Token::new(TokenKind::String, "department"),
        Token::new(TokenKind::Comparison, "="),
        Token::new(TokenKind::String, "Sales"),
        Token::new(TokenKind::RParen, ")"),
        Token::new(TokenKind::And, "AND"),
        Token::new(TokenKind::String, "age"),
        Token::new(TokenKind::Comparison, "<"),
        Token::new(TokenKind::Number, "25"),
    ];

    for token in expected {
        assert_eq!(lexer.next_token().unwrap(), token);
    }
    assert_eq!(lexer.next_token().unwrap(), Token::eof());
}

#[test]
fn test_symbolic_logical_operators_are_canonicalised() {
    let mut lexer = Lexer::new("&& ||");
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::And, "AND"));
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::Or, "OR"));
}

#[test]
fn test_all_comparison_operators() {
    for op in [">", "<", ">=", "<=", "=", "!="] {
        let mut lexer = Lexer::new(op);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::new(TokenKind::Comparison, op),
            "Failed for input: {}",
            op
        );
    }
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(kinds("and or AND OR"), vec![
        TokenKind::String,
        TokenKind::String,
        TokenKind::And,
        TokenKind::Or
    ]);
}

#[test]
fn test_numbers_and_words() {
    assert_eq!(kinds("-12.5 42 x_1 _y"), vec![
        TokenKind::Number,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::String
    ]);
}

#[test]
fn test_quoted_number_is_a_string() {
    let mut lexer = Lexer::new("'30'");
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::String, "30"));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_double_quotes() {
    let mut lexer = Lexer::new("\"Sales\"");
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::String, "Sales"));
}

// ============================================================================
// Invalid tokens
// ============================================================================

#[test]
fn test_invalid_character_reports_position() {
    let mut lexer = Lexer::new("(age > 30 @ salary = 5000)");
    let result = loop {
        match lexer.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => panic!("expected an invalid token"),
            Ok(_) => continue,
            Err(e) => break e,
        }
    };
    assert_eq!(
        result,
        RuleError::InvalidToken {
            token: "@".into(),
            position: 4
        }
    );
    assert!(result.to_string().contains("InvalidToken"));
}

#[test]
fn test_double_equals_is_invalid() {
    let mut lexer = Lexer::new("==");
    assert_eq!(
        lexer.next_token(),
        Err(RuleError::InvalidToken {
            token: "==".into(),
            position: 0
        })
    );
}

#[test]
fn test_unterminated_quote() {
    let mut lexer = Lexer::new("'Sales");
    assert_eq!(
        lexer.next_token(),
        Err(RuleError::InvalidToken {
            token: "'".into(),
            position: 0
        })
    );
}

#[test]
fn test_quoted_text_must_be_a_single_word() {
    let mut lexer = Lexer::new("'Human Resources'");
    assert!(matches!(lexer.next_token(), Err(RuleError::InvalidToken { .. })));

    // quote, '(', quote: the inner substring is not a word
    let mut lexer = Lexer::new("'('");
    assert_eq!(
        lexer.next_token(),
        Err(RuleError::InvalidToken {
            token: "(".into(),
            position: 1
        })
    );
}

#[test]
fn test_mismatched_quotes() {
    let mut lexer = Lexer::new("'Sales\"");
    assert!(matches!(lexer.next_token(), Err(RuleError::InvalidToken { position: 0, .. })));
}

#[test]
fn test_reset_restarts_the_stream() {
    let mut lexer = Lexer::new("a = 1");
    while lexer.next_token().unwrap().kind != TokenKind::Eof {}
    lexer.reset();
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::String, "a"));
    assert_eq!(lexer.raw_tokens(), ["a", "=", "1"]);
}
