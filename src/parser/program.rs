//! Top-level (program) parsing.
//!
//! A program is a sequence of top-level elements: pragmas, includes,
//! module definitions, import/export declarations, ledger declarations,
//! and constructors. This module also owns error containment: an element
//! that fails to parse is recorded as one diagnostic plus an `Error`
//! placeholder node, and parsing resumes at the next element boundary
//! instead of aborting the whole parse. Only the nesting-depth guard
//! propagates out as a hard failure.

use crate::{
    ast::program::{
        ConstructorDefn, ExportDecl, ImportDecl, ImportName, IncludeDecl, LedgerDecl, ModuleDefn,
        Parg, Pelt, PragmaDecl, Program,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::{
    parser::Parser,
    pattern::parse_pattern,
    stmt::parse_block,
    types::{parse_gargs, parse_gparams, parse_type},
    version::parse_version_expr,
};

pub fn parse_program(parser: &mut Parser) -> Result<(Program, Vec<Error>), Error> {
    let start = parser.current_token().span.start.clone();
    let mut errors = vec![];

    let pelts = parse_pelt_sequence(parser, None, &mut errors)?;

    let end = parser.current_token().span.end.clone();
    Ok((
        Program {
            pelts,
            span: Span { start, end },
        },
        errors,
    ))
}

// The kinds that can begin a top-level element; used both for dispatch
// error messages and as synchronization points during recovery.
fn pelt_start_kinds() -> Vec<TokenKind> {
    vec![
        TokenKind::Pragma,
        TokenKind::Include,
        TokenKind::Module,
        TokenKind::Export,
        TokenKind::Sealed,
        TokenKind::Ledger,
        TokenKind::Constructor,
        TokenKind::Import,
    ]
}

/// Parses elements until the terminator (`}` for module bodies, EOF for
/// the top level), containing per-element errors.
fn parse_pelt_sequence(
    parser: &mut Parser,
    terminator: Option<TokenKind>,
    errors: &mut Vec<Error>,
) -> Result<Vec<Pelt>, Error> {
    let mut pelts = vec![];

    loop {
        let kind = parser.current_token_kind();
        if kind == TokenKind::EOF {
            break;
        }
        if terminator == Some(kind) {
            break;
        }

        let checkpoint = parser.mark();
        match parse_pelt(parser, errors) {
            Ok(pelt) => pelts.push(pelt),
            Err(error) => {
                if error.is_fatal() {
                    return Err(error);
                }

                errors.push(error);

                // Rewind so the placeholder covers the whole failed
                // element, then skip to the next recognizable boundary.
                parser.reset(checkpoint);
                let start = parser.current_token().span.start.clone();
                synchronize(parser);
                let end = parser.current_token().span.start.clone();
                pelts.push(Pelt::Error {
                    span: Span { start, end },
                });
            }
        }
    }

    Ok(pelts)
}

// Skips past the failed element: consume at least one token, then stop at
// the next element-starting keyword, an unmatched `}`, or EOF. Braced
// regions inside the failed element are skipped whole so their contents
// produce no further diagnostics.
fn synchronize(parser: &mut Parser) {
    if !parser.has_tokens() {
        return;
    }

    let mut brace_depth = 0;
    if parser.advance().kind == TokenKind::OpenCurly {
        brace_depth = 1;
    }

    loop {
        let kind = parser.current_token_kind();
        match kind {
            TokenKind::EOF => break,
            TokenKind::OpenCurly => {
                brace_depth += 1;
                parser.advance();
            }
            TokenKind::CloseCurly => {
                if brace_depth == 0 {
                    break;
                }
                brace_depth -= 1;
                parser.advance();
            }
            _ if brace_depth == 0 && pelt_start_kinds().contains(&kind) => break,
            _ => {
                parser.advance();
            }
        }
    }
}

fn parse_pelt(parser: &mut Parser, errors: &mut Vec<Error>) -> Result<Pelt, Error> {
    parser.enter_nested()?;
    let result = parse_pelt_inner(parser, errors);
    parser.exit_nested();
    result
}

fn parse_pelt_inner(parser: &mut Parser, errors: &mut Vec<Error>) -> Result<Pelt, Error> {
    match parser.current_token_kind() {
        TokenKind::Pragma => parse_pragma(parser).map(Pelt::Pragma),
        TokenKind::Include => parse_include(parser).map(Pelt::Include),
        TokenKind::Module => parse_module(parser, None, errors).map(Pelt::Module),
        TokenKind::Import => parse_import(parser).map(Pelt::Import),
        TokenKind::Constructor => parse_constructor(parser).map(Pelt::Constructor),
        TokenKind::Sealed | TokenKind::Ledger => parse_ledger(parser, None).map(Pelt::Ledger),
        // `export` can prefix a module or ledger declaration, or open an
        // export-list declaration; one token of lookahead distinguishes.
        TokenKind::Export => match parser.peek(1).kind {
            TokenKind::OpenCurly => parse_export_decl(parser).map(Pelt::ExportList),
            TokenKind::Module => {
                let export = parser.advance().span.start.clone();
                parse_module(parser, Some(export), errors).map(Pelt::Module)
            }
            TokenKind::Sealed | TokenKind::Ledger => {
                let export = parser.advance().span.start.clone();
                parse_ledger(parser, Some(export)).map(Pelt::Ledger)
            }
            _ => {
                parser.advance();
                Err(parser.unexpected(vec![
                    TokenKind::OpenCurly,
                    TokenKind::Module,
                    TokenKind::Sealed,
                    TokenKind::Ledger,
                ]))
            }
        },
        _ => Err(parser.unexpected(pelt_start_kinds())),
    }
}

fn parse_pragma(parser: &mut Parser) -> Result<PragmaDecl, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?;
    let constraint = parse_version_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(PragmaDecl {
        name: name.value,
        constraint,
        span: parser.span_from(start),
    })
}

fn parse_include(parser: &mut Parser) -> Result<IncludeDecl, Error> {
    let start = parser.advance().span.start.clone();

    let file = parser.expect(TokenKind::String)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(IncludeDecl {
        file: file.value,
        span: parser.span_from(start),
    })
}

fn parse_module(
    parser: &mut Parser,
    export_start: Option<Position>,
    errors: &mut Vec<Error>,
) -> Result<ModuleDefn, Error> {
    let module_token = parser.expect(TokenKind::Module)?;
    let exported = export_start.is_some();
    let start = export_start.unwrap_or_else(|| module_token.span.start.clone());

    let name = parser.expect(TokenKind::Identifier)?;

    let gparams = if parser.current_token_kind() == TokenKind::Less {
        parse_gparams(parser)?
    } else {
        vec![]
    };

    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_pelt_sequence(parser, Some(TokenKind::CloseCurly), errors)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(ModuleDefn {
        exported,
        name: name.value,
        gparams,
        body,
        span: parser.span_from(start),
    })
}

fn parse_import(parser: &mut Parser) -> Result<ImportDecl, Error> {
    let start = parser.advance().span.start.clone();

    let name = match parser.current_token_kind() {
        TokenKind::Identifier => ImportName::Ident(parser.advance().value.clone()),
        TokenKind::String => ImportName::File(parser.advance().value.clone()),
        _ => return Err(parser.unexpected(vec![TokenKind::Identifier, TokenKind::String])),
    };

    let gargs = if parser.current_token_kind() == TokenKind::Less {
        parse_gargs(parser)?
    } else {
        vec![]
    };

    let prefix = if parser.current_token_kind() == TokenKind::Prefix {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(ImportDecl {
        name,
        gargs,
        prefix,
        span: parser.span_from(start),
    })
}

fn parse_export_decl(parser: &mut Parser) -> Result<ExportDecl, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenCurly)?;

    let mut names = vec![parser.expect(TokenKind::Identifier)?.value];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break; // trailing comma
        }
        names.push(parser.expect(TokenKind::Identifier)?.value);
    }

    parser.expect(TokenKind::CloseCurly)?;

    // The terminator of an export declaration is optional - the one
    // element kind in the grammar where the semicolon may be omitted.
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(ExportDecl {
        names,
        span: parser.span_from(start),
    })
}

fn parse_ledger(parser: &mut Parser, export_start: Option<Position>) -> Result<LedgerDecl, Error> {
    let first = parser.current_token().span.start.clone();
    let exported = export_start.is_some();
    let start = export_start.unwrap_or(first);

    let sealed = if parser.current_token_kind() == TokenKind::Sealed {
        parser.advance();
        true
    } else {
        false
    };

    parser.expect(TokenKind::Ledger)?;
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let ty = parse_type(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(LedgerDecl {
        exported,
        sealed,
        name: name.value,
        ty,
        span: parser.span_from(start),
    })
}

fn parse_constructor(parser: &mut Parser) -> Result<ConstructorDefn, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let parg_start = parser.current_token().span.start.clone();
        let pattern = parse_pattern(parser)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;

        parameters.push(Parg {
            pattern,
            ty,
            span: parser.span_from(parg_start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block(parser)?;

    // Trailing semicolon after the body is permitted.
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(ConstructorDefn {
        parameters,
        body,
        span: parser.span_from(start),
    })
}
