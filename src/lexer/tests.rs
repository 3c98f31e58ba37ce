//! Unit tests for the lexer.

use crate::lexer::lexer::tokenize;
use crate::lexer::tokens::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), None)
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_empty_source_yields_eof() {
    let tokens = tokenize(String::new(), None).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].value, "EOF");
}

#[test]
fn test_reserved_words() {
    assert_eq!(
        kinds("var func if else while for in return break continue"),
        vec![
            TokenKind::Var,
            TokenKind::Func,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_concurrency_reserved_words() {
    assert_eq!(
        kinds("seq par s_channel c_channel"),
        vec![
            TokenKind::Seq,
            TokenKind::Par,
            TokenKind::SChannel,
            TokenKind::CChannel,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_type_words() {
    assert_eq!(
        kinds("number string bool void list dict any"),
        vec![
            TokenKind::NumberType,
            TokenKind::StringType,
            TokenKind::BoolType,
            TokenKind::VoidType,
            TokenKind::ListType,
            TokenKind::DictType,
            TokenKind::AnyType,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_identifiers() {
    let tokens = tokenize("foo _bar baz42 trueish".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "_bar");
    assert_eq!(tokens[2].value, "baz42");
    // Longest match wins, so a keyword prefix stays an identifier.
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "trueish");
}

#[test]
fn test_numbers() {
    let tokens = tokenize("42 3.14 0".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
}

#[test]
fn test_string_literal() {
    let tokens = tokenize("\"hello world\"".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello world");
}

#[test]
fn test_string_escapes() {
    let tokens = tokenize("\"a\\nb\\tc\\\"d\\\\e\"".to_string(), None).unwrap();
    assert_eq!(tokens[0].value, "a\nb\tc\"d\\e");
}

#[test]
fn test_unknown_escape_passes_through() {
    let tokens = tokenize("\"a\\qb\"".to_string(), None).unwrap();
    assert_eq!(tokens[0].value, "aqb");
}

#[test]
fn test_two_character_operators_are_greedy() {
    assert_eq!(
        kinds("== != <= >= || && ->"),
        vec![
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Or,
            TokenKind::And,
            TokenKind::Arrow,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_single_character_operators() {
    assert_eq!(
        kinds("= ! < > + - * / % . ; : ,"),
        vec![
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_brackets() {
    assert_eq!(
        kinds("( ) [ ] { }"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_line_comment_is_skipped() {
    assert_eq!(
        kinds("var x # this is ignored\nvar y"),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_block_comment_is_skipped() {
    assert_eq!(
        kinds("var /* anything\n at all */ x"),
        vec![TokenKind::Var, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_arrow_before_dash() {
    let tokens = tokenize("-> -".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Arrow);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
}

#[test]
fn test_slash_is_still_division() {
    let tokens = tokenize("a / b".to_string(), None).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Slash);
}

#[test]
fn test_unterminated_string_is_an_error() {
    let error = tokenize("\"never closed".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedString");
}

#[test]
fn test_unterminated_comment_is_an_error() {
    let error = tokenize("var x /* never closed".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedComment");
}

#[test]
fn test_unrecognised_token_is_an_error() {
    let error = tokenize("var x @ 5".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("var x".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 1);
    assert_eq!(tokens[1].span.start.column, 5);
}

#[test]
fn test_positions_track_newlines() {
    let tokens = tokenize("var x\n  var y".to_string(), None).unwrap();
    // `var` on the second line starts at column 3.
    assert_eq!(tokens[2].span.start.line, 2);
    assert_eq!(tokens[2].span.start.column, 3);
    assert_eq!(tokens[3].span.start.line, 2);
    assert_eq!(tokens[3].span.start.column, 7);
}

#[test]
fn test_small_program() {
    let source = "func add(a: number, b: number) -> number {\n    return a + b\n}";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Func,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::NumberType,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::NumberType,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::NumberType,
            TokenKind::OpenCurly,
            TokenKind::Return,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}
