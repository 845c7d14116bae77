//! The version-constraint sub-grammar embedded in pragmas.
//!
//! A constraint is a boolean expression over comparison atoms: `||` at
//! precedence 1 (left-associative), `&&` at precedence 2 (left), unary
//! `!`, a prefix comparison operator applied to a single version or
//! natural atom (e.g. `>=1.2.3`), and parenthesized grouping.

use crate::{
    ast::program::{VersionAtom, VersionExpr, VersionOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::natural_value, parser::Parser};

pub fn parse_version_expr(parser: &mut Parser) -> Result<VersionExpr, Error> {
    let mut left = parse_version_and(parser)?;

    while parser.current_token_kind() == TokenKind::Or {
        parser.advance();
        let right = parse_version_and(parser)?;
        left = VersionExpr::Or {
            span: Span::merge(left.span(), right.span()),
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    Ok(left)
}

fn parse_version_and(parser: &mut Parser) -> Result<VersionExpr, Error> {
    let mut left = parse_version_term(parser)?;

    while parser.current_token_kind() == TokenKind::And {
        parser.advance();
        let right = parse_version_term(parser)?;
        left = VersionExpr::And {
            span: Span::merge(left.span(), right.span()),
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    Ok(left)
}

fn parse_version_term(parser: &mut Parser) -> Result<VersionExpr, Error> {
    parser.enter_nested()?;
    let result = parse_version_term_inner(parser);
    parser.exit_nested();
    result
}

fn parse_version_term_inner(parser: &mut Parser) -> Result<VersionExpr, Error> {
    match parser.current_token_kind() {
        TokenKind::Not => {
            let token = parser.advance().clone();
            let operand = parse_version_term(parser)?;
            Ok(VersionExpr::Not {
                span: Span::merge(&token.span, operand.span()),
                operand: Box::new(operand),
            })
        }
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::GreaterEquals
        | TokenKind::Greater => {
            let token = parser.advance().clone();
            let op = match token.kind {
                TokenKind::Less => VersionOp::Less,
                TokenKind::LessEquals => VersionOp::LessEquals,
                TokenKind::GreaterEquals => VersionOp::GreaterEquals,
                _ => VersionOp::Greater,
            };
            let atom = parse_version_atom(parser)?;
            Ok(VersionExpr::Cmp {
                span: Span::merge(&token.span, atom.span()),
                op,
                atom,
            })
        }
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_version_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Ok(inner)
        }
        TokenKind::Natural | TokenKind::Version => {
            Ok(VersionExpr::Atom(parse_version_atom(parser)?))
        }
        _ => Err(parser.unexpected(vec![
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::OpenParen,
            TokenKind::Natural,
            TokenKind::Version,
        ])),
    }
}

fn parse_version_atom(parser: &mut Parser) -> Result<VersionAtom, Error> {
    match parser.current_token_kind() {
        TokenKind::Natural => {
            let token = parser.advance().clone();
            let value = natural_value(&token)?;
            Ok(VersionAtom::Nat {
                value,
                span: token.span,
            })
        }
        TokenKind::Version => {
            let token = parser.advance().clone();
            let mut parts = vec![];
            for part in token.value.split('.') {
                let value = part.parse().map_err(|_| {
                    Error::new(
                        ErrorImpl::NaturalOutOfRange {
                            token: token.value.clone(),
                        },
                        token.span.clone(),
                    )
                })?;
                parts.push(value);
            }
            Ok(VersionAtom::Version {
                parts,
                span: token.span,
            })
        }
        _ => Err(parser.unexpected(vec![TokenKind::Natural, TokenKind::Version])),
    }
}
