use crate::{
    ast::expressions::{BinaryOp, Expr, ExprSeq},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nested()?;
    let result = parse_expr_inner(parser, bp);
    parser.exit_nested();
    result
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected(vec![
            TokenKind::Natural,
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Not,
        ]));
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than the context, keep folding
    // it into the left-hand side.
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

/// Parses an expression-sequence: one expression, or two or more separated
/// by commas. The sequence must end in an expression; there is no dangling
/// comma in this position.
pub fn parse_expr_seq(parser: &mut Parser) -> Result<ExprSeq, Error> {
    let first = parse_expr(parser, BindingPower::Default)?;
    continue_expr_seq(parser, first)
}

/// Extends an already-parsed first expression into an expression-sequence
/// while commas follow. Used by the statement parser, which must see the
/// first expression before it can tell a sequence from an assignment.
pub fn continue_expr_seq(parser: &mut Parser, first: Expr) -> Result<ExprSeq, Error> {
    let mut span = first.span().clone();
    let mut exprs = vec![first];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        let expr = parse_expr(parser, BindingPower::Default)?;
        span = Span::merge(&span, expr.span());
        exprs.push(expr);
    }

    Ok(ExprSeq { exprs, span })
}

/// Reads a natural token's value as a machine integer, for the positions
/// that require one (indexes, sizes, range bounds, version parts).
pub fn natural_value(token: &Token) -> Result<u64, Error> {
    token.value.parse().map_err(|_| {
        Error::new(
            ErrorImpl::NaturalOutOfRange {
                token: token.value.clone(),
            },
            token.span.clone(),
        )
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Natural => {
            let token = parser.advance().clone();
            Ok(Expr::Natural {
                value: token.value,
                span: token.span,
            })
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(Expr::Str {
                value: token.value,
                span: token.span,
            })
        }
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(Expr::Ident {
                name: token.value,
                span: token.span,
            })
        }
        _ => Err(parser.unexpected(vec![
            TokenKind::Natural,
            TokenKind::String,
            TokenKind::Identifier,
        ])),
    }
}

fn binary_op_for(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Or => Some(BinaryOp::Or),
        TokenKind::And => Some(BinaryOp::And),
        TokenKind::Equals => Some(BinaryOp::Equals),
        TokenKind::NotEquals => Some(BinaryOp::NotEquals),
        TokenKind::Less => Some(BinaryOp::Less),
        TokenKind::LessEquals => Some(BinaryOp::LessEquals),
        TokenKind::Greater => Some(BinaryOp::Greater),
        TokenKind::GreaterEquals => Some(BinaryOp::GreaterEquals),
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Dash => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        _ => None,
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(op) = binary_op_for(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: vec![],
                found: operator_token.value.clone(),
            },
            operator_token.span,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        span: Span::merge(left.span(), right.span()),
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

/// Relational operators are non-associative: after one comparison at this
/// tier, a second relational token is a syntax error rather than a chain.
pub fn parse_relational_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let expr = parse_binary_expr(parser, left, bp)?;

    let next = parser.current_token();
    if matches!(
        next.kind,
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals
    ) {
        return Err(Error::new(
            ErrorImpl::ChainedComparison,
            next.span.clone(),
        ));
    }

    Ok(expr)
}

/// `condition ? then : else`, with both branches parsed at the lowest
/// binding power so the form right-associates.
pub fn parse_ternary_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let then_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let else_branch = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Ternary {
        span: Span::merge(left.span(), else_branch.span()),
        condition: Box::new(left),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

/// `value as type` - the operand after `as` is parsed in type position.
pub fn parse_cast_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let target = parse_type(parser)?;
    let span = Span::merge(left.span(), target.span());

    Ok(Expr::Cast {
        value: Box::new(left),
        target,
        span,
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Not {
        span: Span::merge(&operator_token.span, operand.span()),
        operand: Box::new(operand),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Grouping {
        inner: Box::new(inner),
        span: Span::merge(&open.span, &close.span),
    })
}

/// `value[nat]` - the grammar restricts indexes to natural literals.
pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let index_token = parser.expect(TokenKind::Natural)?;
    let index = natural_value(&index_token)?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Index {
        span: Span::merge(left.span(), &close.span),
        value: Box::new(left),
        index,
    })
}

/// `value.member` or `value.method(args)`; argument lists permit a
/// trailing comma.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let member = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(Expr::Member {
            span: Span::merge(left.span(), &member.span),
            value: Box::new(left),
            member: member.value,
        });
    }

    parser.advance();

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::MethodCall {
        span: Span::merge(left.span(), &close.span),
        value: Box::new(left),
        method: member.value,
        arguments,
    })
}
