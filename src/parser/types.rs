//! Type parsing implementation.
//!
//! Parses type expressions and generic argument/parameter lists:
//!
//! - Primitive types (`Boolean`, `Field`)
//! - Sized builtins (`Uint<n>`, `Uint<lo..hi>`, `Bytes<n>`, `Opaque<"s">`,
//!   `Vector<n, T>`)
//! - Tuple types (`[T, U]`) and type references (`Name<garg, ...>`)
//!
//! A `<` only ever opens a generic list here, in type position; the
//! expression parser never consults these rules, which is what resolves
//! the collision with the relational operators without backtracking. The
//! one place a `<` cannot be read either way - a garg position where a
//! type itself is required - reports AmbiguousAngleBracket rather than
//! leaving the behavior undefined.

use crate::{
    ast::{
        program::GParam,
        types::{GArg, TSize, TypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::natural_value, parser::Parser};

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    parser.enter_nested()?;
    let result = parse_type_inner(parser);
    parser.exit_nested();
    result
}

fn parse_type_inner(parser: &mut Parser) -> Result<TypeExpr, Error> {
    match parser.current_token_kind() {
        TokenKind::Boolean => {
            let token = parser.advance().clone();
            Ok(TypeExpr::Boolean { span: token.span })
        }
        TokenKind::Field => {
            let token = parser.advance().clone();
            Ok(TypeExpr::Field { span: token.span })
        }
        TokenKind::Uint => parse_uint_type(parser),
        TokenKind::Bytes => {
            let start = parser.advance().span.start.clone();
            parser.expect(TokenKind::Less)?;
            let size = parse_tsize(parser)?;
            parser.expect(TokenKind::Greater)?;
            Ok(TypeExpr::Bytes {
                size,
                span: parser.span_from(start),
            })
        }
        TokenKind::Opaque => {
            let start = parser.advance().span.start.clone();
            parser.expect(TokenKind::Less)?;
            let tag = parser.expect(TokenKind::String)?;
            parser.expect(TokenKind::Greater)?;
            Ok(TypeExpr::Opaque {
                tag: tag.value,
                span: parser.span_from(start),
            })
        }
        TokenKind::Vector => {
            let start = parser.advance().span.start.clone();
            parser.expect(TokenKind::Less)?;
            let size = parse_tsize(parser)?;
            parser.expect(TokenKind::Comma)?;
            let element = parse_type(parser)?;
            parser.expect(TokenKind::Greater)?;
            Ok(TypeExpr::Vector {
                size,
                element: Box::new(element),
                span: parser.span_from(start),
            })
        }
        TokenKind::OpenBracket => parse_tuple_type(parser),
        TokenKind::Identifier => {
            let name = parser.advance().clone();
            let gargs = if parser.current_token_kind() == TokenKind::Less {
                parse_gargs(parser)?
            } else {
                vec![]
            };
            Ok(TypeExpr::Ref {
                name: name.value,
                gargs,
                span: parser.span_from(name.span.start),
            })
        }
        // A bare `<` where a type is required cannot open anything.
        TokenKind::Less => Err(Error::new(
            ErrorImpl::AmbiguousAngleBracket,
            parser.current_token().span.clone(),
        )),
        _ => Err(parser.unexpected(vec![
            TokenKind::Boolean,
            TokenKind::Field,
            TokenKind::Uint,
            TokenKind::Bytes,
            TokenKind::Opaque,
            TokenKind::Vector,
            TokenKind::OpenBracket,
            TokenKind::Identifier,
        ])),
    }
}

// Uint<n> and Uint<lo..hi> share a prefix; the bounded form is selected by
// the `..` after the first size.
fn parse_uint_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Less)?;
    let first = parse_tsize(parser)?;

    if parser.current_token_kind() == TokenKind::DotDot {
        parser.advance();
        let hi = parse_tsize(parser)?;
        parser.expect(TokenKind::Greater)?;
        return Ok(TypeExpr::UintRange {
            lo: first,
            hi,
            span: parser.span_from(start),
        });
    }

    parser.expect(TokenKind::Greater)?;
    Ok(TypeExpr::Uint {
        size: first,
        span: parser.span_from(start),
    })
}

fn parse_tuple_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.advance().span.start.clone();

    let mut elements = vec![parse_type(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseBracket {
            break; // trailing comma
        }
        elements.push(parse_type(parser)?);
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(TypeExpr::Tuple {
        elements,
        span: parser.span_from(start),
    })
}

/// Parses a type-level size: a natural literal or a generic identifier.
pub fn parse_tsize(parser: &mut Parser) -> Result<TSize, Error> {
    match parser.current_token_kind() {
        TokenKind::Natural => {
            let token = parser.advance().clone();
            let value = natural_value(&token)?;
            Ok(TSize::Nat {
                value,
                span: token.span,
            })
        }
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(TSize::Ident {
                name: token.value,
                span: token.span,
            })
        }
        _ => Err(parser.unexpected(vec![TokenKind::Natural, TokenKind::Identifier])),
    }
}

/// Parses a generic-argument list `<garg, ..., garg>`; a trailing comma is
/// permitted. Only called when the current token is `<` and the parser is
/// in type position (or just after a module/import name).
pub fn parse_gargs(parser: &mut Parser) -> Result<Vec<GArg>, Error> {
    parser.expect(TokenKind::Less)?;

    let mut gargs = vec![parse_garg(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::Greater {
            break; // trailing comma
        }
        gargs.push(parse_garg(parser)?);
    }

    parser.expect(TokenKind::Greater)?;
    Ok(gargs)
}

fn parse_garg(parser: &mut Parser) -> Result<GArg, Error> {
    if parser.current_token_kind() == TokenKind::Natural {
        let token = parser.advance().clone();
        let value = natural_value(&token)?;
        return Ok(GArg::Nat {
            value,
            span: token.span,
        });
    }

    Ok(GArg::Type(parse_type(parser)?))
}

/// Parses a generic-parameter list `<[#]name, ..., [#]name>`; the `#`
/// prefix marks a compile-time numeric constant parameter.
pub fn parse_gparams(parser: &mut Parser) -> Result<Vec<GParam>, Error> {
    parser.expect(TokenKind::Less)?;

    let mut gparams = vec![parse_gparam(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::Greater {
            break; // trailing comma
        }
        gparams.push(parse_gparam(parser)?);
    }

    parser.expect(TokenKind::Greater)?;
    Ok(gparams)
}

fn parse_gparam(parser: &mut Parser) -> Result<GParam, Error> {
    let start = parser.current_token().span.start.clone();

    let is_const = if parser.current_token_kind() == TokenKind::Hash {
        parser.advance();
        true
    } else {
        false
    };

    let name = parser.expect(TokenKind::Identifier)?;
    Ok(GParam {
        name: name.value,
        is_const,
        span: Span {
            start,
            end: name.span.end,
        },
    })
}
