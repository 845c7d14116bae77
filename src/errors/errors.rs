use std::fmt::Display;

use thiserror::Error as ThisError;

use crate::{lexer::tokens::TokenKind, Span};

/// A lex or parse failure tied to the span it occurred at.
///
/// Errors are recovered at statement and top-level-element boundaries and
/// surface to callers as [`Diagnostic`]s; the single exception is the
/// nesting-depth guard, which aborts the parse (see [`Error::is_fatal`]).
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::LeadingZero { .. } => "LeadingZero",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InputTooLarge { .. } => "InputTooLarge",
            ErrorImpl::TokenLimitExceeded { .. } => "TokenLimitExceeded",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NaturalOutOfRange { .. } => "NaturalOutOfRange",
            ErrorImpl::ChainedComparison => "ChainedComparison",
            ErrorImpl::NonLiteralRangeBound { .. } => "NonLiteralRangeBound",
            ErrorImpl::AmbiguousAngleBracket => "AmbiguousAngleBracket",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    /// True for conditions that abort the whole parse instead of being
    /// contained at the nearest synchronization point.
    pub fn is_fatal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::NestingTooDeep { .. })
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::LeadingZero { token } => ErrorTip::Suggestion(format!(
                "Naturals take the form 0 or [1-9][0-9]*, found `{}`",
                token
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string with `\"`"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Close the comment with `*/`"))
            }
            ErrorImpl::InputTooLarge { .. } => ErrorTip::None,
            ErrorImpl::TokenLimitExceeded { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { found, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                found
            )),
            ErrorImpl::NaturalOutOfRange { token } => ErrorTip::Suggestion(format!(
                "`{}` does not fit in a size position",
                token
            )),
            ErrorImpl::ChainedComparison => ErrorTip::Suggestion(String::from(
                "Comparisons do not chain; write `a < b && b < c` instead",
            )),
            ErrorImpl::NonLiteralRangeBound { found } => ErrorTip::Suggestion(format!(
                "Range loop bounds must be natural literals, found `{}`",
                found
            )),
            ErrorImpl::AmbiguousAngleBracket => ErrorTip::Suggestion(String::from(
                "`<` opens a generic list only after a type or module name",
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting exceeds the configured maximum of {}",
                limit
            )),
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic {
            message: self.internal_error.to_string(),
            span: self.span,
            severity: Severity::Error,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(ThisError, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("leading zeros are not permitted in naturals: {token:?}")]
    LeadingZero { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("source exceeds the input limit: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },
    #[error("token count exceeds the limit of {limit}")]
    TokenLimitExceeded { limit: usize },
    #[error("expected one of {expected:?}, found {found:?}")]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: String,
    },
    #[error("natural literal out of range: {token:?}")]
    NaturalOutOfRange { token: String },
    #[error("relational operators are non-associative")]
    ChainedComparison,
    #[error("range bound must be a natural literal, found {found:?}")]
    NonLiteralRangeBound { found: String },
    #[error("`<` cannot be disambiguated here")]
    AmbiguousAngleBracket,
    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize },
}

/// How serious a diagnostic is. Everything the parser currently emits is an
/// error; the warning level exists for consumers layering their own checks
/// over the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The user-facing record of a lex or parse failure: a human-readable
/// message, the offending span, and a severity. Accumulated per parse
/// session, never fatal to the caller.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}
