use crate::{
    ast::statements::{AssignOp, BlockStmt, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{continue_expr_seq, natural_value, parse_expr, parse_expr_seq},
    lookups::BindingPower,
    parser::Parser,
    pattern::parse_pattern,
    types::parse_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.enter_nested()?;
    let result = parse_stmt_inner(parser);
    parser.exit_nested();
    result
}

fn parse_stmt_inner(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    // Everything else starts with an expression. Parse one, then let the
    // next token decide between the assignment forms and a bare
    // expression-sequence statement.
    let start = parser.current_token().span.start.clone();
    let expr = parse_expr(parser, BindingPower::Default)?;

    match parser.current_token_kind() {
        TokenKind::Assignment | TokenKind::PlusEquals | TokenKind::MinusEquals => {
            let op = match parser.advance().kind {
                TokenKind::PlusEquals => AssignOp::Add,
                TokenKind::MinusEquals => AssignOp::Sub,
                _ => AssignOp::Set,
            };

            let value = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(Stmt::Assign {
                target: expr,
                op,
                value,
                span: parser.span_from(start),
            })
        }
        TokenKind::Comma | TokenKind::Semicolon => {
            let seq = continue_expr_seq(parser, expr)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(Stmt::ExprSeq {
                seq,
                span: parser.span_from(start),
            })
        }
        _ => Err(parser.unexpected(vec![
            TokenKind::Assignment,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::Comma,
            TokenKind::Semicolon,
        ])),
    }
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr_seq(parser)?)
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return {
        value,
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr_seq(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_branch = parse_stmt(parser)?;

    // A dangling else binds to the nearest unmatched if.
    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch,
        span: parser.span_from(start),
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    parser.expect(TokenKind::Const)?;
    let binding = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Of)?;

    // A natural followed by `..` commits to the numeric-range production;
    // both bounds must then be natural literals.
    if parser.current_token_kind() == TokenKind::Natural
        && parser.peek(1).kind == TokenKind::DotDot
    {
        let lo_token = parser.expect(TokenKind::Natural)?;
        let lo = natural_value(&lo_token)?;
        parser.expect(TokenKind::DotDot)?;

        if parser.current_token_kind() != TokenKind::Natural {
            let found = parser.current_token();
            return Err(Error::new(
                ErrorImpl::NonLiteralRangeBound {
                    found: found.value.clone(),
                },
                found.span.clone(),
            ));
        }

        let hi_token = parser.expect(TokenKind::Natural)?;
        let hi = natural_value(&hi_token)?;

        parser.expect(TokenKind::CloseParen)?;
        let body = parse_stmt(parser)?;

        return Ok(Stmt::ForRange {
            binding: binding.value,
            lo,
            hi,
            body: Box::new(body),
            span: parser.span_from(start),
        });
    }

    let iterable = parse_expr_seq(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::ForEach {
        binding: binding.value,
        iterable,
        body: Box::new(body),
        span: parser.span_from(start),
    })
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let message = parser.expect(TokenKind::String)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assert {
        condition,
        message: message.value,
        span: parser.span_from(start),
    })
}

pub fn parse_const_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let pattern = parse_pattern(parser)?;

    let ty = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::ConstDecl {
        pattern,
        ty,
        value,
        span: parser.span_from(start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// Parses `{ stmt ... stmt }`. Also used directly for constructor bodies.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(open.span.start),
    })
}
