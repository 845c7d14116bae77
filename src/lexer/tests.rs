//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Naturals and version literals
//! - Verbatim string literals
//! - Operators with maximal munch
//! - Comments
//! - Error cases and recovery

use super::{
    lexer::{tokenize, tokenize_with_limits},
    tokens::TokenKind,
};
use crate::limits::ParserLimits;

#[test]
fn test_tokenize_keywords() {
    let source =
        "pragma include module export sealed ledger constructor import prefix return if else for const of assert as"
            .to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Pragma);
    assert_eq!(tokens[1].kind, TokenKind::Include);
    assert_eq!(tokens[2].kind, TokenKind::Module);
    assert_eq!(tokens[3].kind, TokenKind::Export);
    assert_eq!(tokens[4].kind, TokenKind::Sealed);
    assert_eq!(tokens[5].kind, TokenKind::Ledger);
    assert_eq!(tokens[6].kind, TokenKind::Constructor);
    assert_eq!(tokens[7].kind, TokenKind::Import);
    assert_eq!(tokens[8].kind, TokenKind::Prefix);
    assert_eq!(tokens[9].kind, TokenKind::Return);
    assert_eq!(tokens[10].kind, TokenKind::If);
    assert_eq!(tokens[11].kind, TokenKind::Else);
    assert_eq!(tokens[12].kind, TokenKind::For);
    assert_eq!(tokens[13].kind, TokenKind::Const);
    assert_eq!(tokens[14].kind, TokenKind::Of);
    assert_eq!(tokens[15].kind, TokenKind::Assert);
    assert_eq!(tokens[16].kind, TokenKind::As);
    assert_eq!(tokens[17].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_type_keywords() {
    let source = "Boolean Field Uint Bytes Opaque Vector".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].kind, TokenKind::Field);
    assert_eq!(tokens[2].kind, TokenKind::Uint);
    assert_eq!(tokens[3].kind, TokenKind::Bytes);
    assert_eq!(tokens[4].kind, TokenKind::Opaque);
    assert_eq!(tokens[5].kind, TokenKind::Vector);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase pragmatic".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    for (i, expected) in ["foo", "bar", "baz_123", "_underscore", "CamelCase"]
        .iter()
        .enumerate()
    {
        assert_eq!(tokens[i].kind, TokenKind::Identifier);
        assert_eq!(tokens[i].value, *expected);
    }

    // Keyword prefixes are matched greedily: `pragmatic` is an identifier.
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].value, "pragmatic");
}

#[test]
fn test_tokenize_naturals() {
    let source = "0 42 1000".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Natural);
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].kind, TokenKind::Natural);
    assert_eq!(tokens[1].value, "42");
    assert_eq!(tokens[2].kind, TokenKind::Natural);
    assert_eq!(tokens[2].value, "1000");
}

#[test]
fn test_tokenize_versions() {
    let source = "1.2 0.13 1.2.3".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Version);
    assert_eq!(tokens[0].value, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Version);
    assert_eq!(tokens[1].value, "0.13");
    assert_eq!(tokens[2].kind, TokenKind::Version);
    assert_eq!(tokens[2].value, "1.2.3");
}

#[test]
fn test_version_with_four_parts_stops_at_three() {
    // A version literal has at most three parts; the rest lexes separately.
    let source = "1.2.3.4".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Version);
    assert_eq!(tokens[0].value, "1.2.3");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Natural);
    assert_eq!(tokens[2].value, "4");
}

#[test]
fn test_natural_before_dotdot_is_not_a_version() {
    let source = "0..10".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Natural);
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].kind, TokenKind::DotDot);
    assert_eq!(tokens[2].kind, TokenKind::Natural);
    assert_eq!(tokens[2].value, "10");
}

#[test]
fn test_leading_zero_is_an_error() {
    let source = "042".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "LeadingZero");
    // The token is still produced so parsing can continue.
    assert_eq!(tokens[0].kind, TokenKind::Natural);
    assert_eq!(tokens[0].value, "042");
}

#[test]
fn test_tokenize_strings_verbatim() {
    let source = r#""hello" "multiple words" """#.to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
}

#[test]
fn test_strings_have_no_escape_processing() {
    // Backslash sequences are taken verbatim, not interpreted.
    let source = r#""a\nb""#.to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\\nb");
}

#[test]
fn test_unterminated_string_is_an_error() {
    let source = "\"open\nconst".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedString");
    // Lexing resumes on the next line.
    assert_eq!(tokens[0].kind, TokenKind::Const);
}

#[test]
fn test_tokenize_operators_maximal_munch() {
    let source = "== != <= >= && || += -= .. = ! < > + - * .".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    let expected = [
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::LessEquals,
        TokenKind::GreaterEquals,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::PlusEquals,
        TokenKind::MinusEquals,
        TokenKind::DotDot,
        TokenKind::Assignment,
        TokenKind::Not,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Dot,
    ];

    for (i, kind) in expected.iter().enumerate() {
        assert_eq!(tokens[i].kind, *kind, "token {}", i);
    }
}

#[test]
fn test_adjacent_multichar_operators() {
    let source = "a<=b".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::LessEquals);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) [ ] { } ; : ? , #".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    let expected = [
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::OpenCurly,
        TokenKind::CloseCurly,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Question,
        TokenKind::Comma,
        TokenKind::Hash,
    ];

    for (i, kind) in expected.iter().enumerate() {
        assert_eq!(tokens[i].kind, *kind, "token {}", i);
    }
}

#[test]
fn test_line_comments_are_skipped() {
    let source = "const // the counter\nx".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_block_comments_are_skipped() {
    let source = "const /* spans\nlines */ x".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn test_unterminated_block_comment_is_an_error() {
    let source = "const /* never closed".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedComment");
    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_unrecognised_character_recovers_at_whitespace() {
    let source = "const @@@ x".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedCharacter");
    // Lexing resumes after the unrecognized run.
    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "x");
}

#[test]
fn test_token_stream_ends_in_exactly_one_eof() {
    let source = "ledger x: Field;".to_string();
    let (tokens, errors) = tokenize(source, Some("test.compact".to_string()));
    assert!(errors.is_empty());

    let eof_count = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::EOF)
        .count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_empty_source() {
    let (tokens, errors) = tokenize("".to_string(), Some("test.compact".to_string()));
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_spans_are_byte_offsets() {
    let source = "ledger count".to_string();
    let (tokens, _) = tokenize(source.clone(), Some("test.compact".to_string()));

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 6);
    assert_eq!(tokens[1].span.start.0, 7);
    assert_eq!(tokens[1].span.end.0, 12);
    assert_eq!(&source[7..12], "count");
}

#[test]
fn test_input_size_limit() {
    let mut limits = ParserLimits::default();
    limits.max_input_size = 8;

    let (tokens, errors) = tokenize_with_limits(
        "ledger count: Field;".to_string(),
        Some("test.compact".to_string()),
        &limits,
    );

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InputTooLarge");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_token_count_limit() {
    let mut limits = ParserLimits::default();
    limits.max_token_count = 4;

    let (tokens, errors) = tokenize_with_limits(
        "a b c d e f g h".to_string(),
        Some("test.compact".to_string()),
        &limits,
    );

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TokenLimitExceeded");
    // Four real tokens plus the closing EOF.
    assert_eq!(tokens.len(), 5);
}
