use crate::{
    ast::patterns::{Pattern, PatternStructElt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

pub fn parse_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    parser.enter_nested()?;
    let result = parse_pattern_inner(parser);
    parser.exit_nested();
    result
}

fn parse_pattern_inner(parser: &mut Parser) -> Result<Pattern, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(Pattern::Ident {
                name: token.value,
                span: token.span,
            })
        }
        TokenKind::OpenBracket => parse_tuple_pattern(parser),
        TokenKind::OpenCurly => parse_struct_pattern(parser),
        _ => Err(parser.unexpected(vec![
            TokenKind::Identifier,
            TokenKind::OpenBracket,
            TokenKind::OpenCurly,
        ])),
    }
}

// Tuple elements may be empty slots: `[a, , c]` skips the second position.
fn parse_tuple_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.advance().span.start.clone();
    let mut elements = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseBracket => break,
            TokenKind::Comma => {
                // An immediate comma means the slot before it was empty.
                elements.push(None);
                parser.advance();
            }
            _ => {
                elements.push(Some(parse_pattern(parser)?));
                if parser.current_token_kind() == TokenKind::Comma {
                    parser.advance();
                } else {
                    break;
                }
            }
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(Pattern::Tuple {
        elements,
        span: parser.span_from(start),
    })
}

fn parse_struct_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.advance().span.start.clone();
    let mut elements = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field = parser.expect(TokenKind::Identifier)?;

        let pattern = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            Some(parse_pattern(parser)?)
        } else {
            None
        };

        let end = parser.previous_token_end();
        elements.push(PatternStructElt {
            field: field.value,
            pattern,
            span: Span {
                start: field.span.start,
                end,
            },
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(Pattern::Struct {
        elements,
        span: parser.span_from(start),
    })
}
