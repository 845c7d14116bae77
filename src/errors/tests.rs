//! Unit tests for error handling.
//!
//! This module contains tests for error types, fatality classification,
//! and conversion into diagnostics.

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Severity};
use crate::lexer::tokens::TokenKind;
use crate::{Position, Span};

fn span_at(offset: u32) -> Span {
    let file = Rc::new("test.compact".to_string());
    Span {
        start: Position(offset, Rc::clone(&file)),
        end: Position(offset + 1, file),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '@' },
        span_at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert!(!error.is_fatal());
}

#[test]
fn test_error_span() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Semicolon],
            found: "}".to_string(),
        },
        span_at(42),
    );

    assert_eq!(error.get_span().start.0, 42);
}

#[test]
fn test_unexpected_token_error_carries_expected_set() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Identifier, TokenKind::OpenBracket],
            found: "42".to_string(),
        },
        span_at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");

    let diagnostic = error.into_diagnostic();
    assert!(diagnostic.message.contains("Identifier"));
    assert!(diagnostic.message.contains("OpenBracket"));
    assert!(diagnostic.message.contains("42"));
}

#[test]
fn test_nesting_too_deep_is_fatal() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 256 }, span_at(0));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(error.is_fatal());
}

#[test]
fn test_chained_comparison_is_not_fatal() {
    let error = Error::new(ErrorImpl::ChainedComparison, span_at(5));

    assert_eq!(error.get_error_name(), "ChainedComparison");
    assert!(!error.is_fatal());

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("&&")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_into_diagnostic() {
    let error = Error::new(
        ErrorImpl::LeadingZero {
            token: "042".to_string(),
        },
        span_at(3),
    );

    let diagnostic = error.into_diagnostic();
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.span.start.0, 3);
    assert!(diagnostic.message.contains("042"));
}

#[test]
fn test_unrecognised_character_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '~' },
        span_at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_ambiguous_angle_bracket_error() {
    let error = Error::new(ErrorImpl::AmbiguousAngleBracket, span_at(8));

    assert_eq!(error.get_error_name(), "AmbiguousAngleBracket");
    assert!(!error.is_fatal());
}

#[test]
fn test_non_literal_range_bound_error() {
    let error = Error::new(
        ErrorImpl::NonLiteralRangeBound {
            found: "x".to_string(),
        },
        span_at(20),
    );

    assert_eq!(error.get_error_name(), "NonLiteralRangeBound");
    let diagnostic = error.into_diagnostic();
    assert!(diagnostic.message.contains("x"));
}
