use std::collections::HashMap;

use crate::{ast::{expressions::Expr, statements::Stmt}, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// The expression precedence tiers, lowest to highest binding power. The
/// ordering of the variants is the ordering of the tiers; the derived
/// `PartialOrd` is what the precedence-climbing loop compares.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Ternary,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Cast,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Ternary, right-associative
    parser.led(TokenKind::Question, BindingPower::Ternary, parse_ternary_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);

    // Relational, non-associative
    parser.led(TokenKind::Less, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_relational_expr);

    // Cast binds looser than arithmetic: `a + b as T` is `(a + b) as T`
    parser.led(TokenKind::As, BindingPower::Cast, parse_cast_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix chain: indexing, member access, method call
    parser.led(TokenKind::OpenBracket, BindingPower::Postfix, parse_index_expr);
    parser.led(TokenKind::Dot, BindingPower::Postfix, parse_member_expr);

    // Literals and symbols
    parser.nud(TokenKind::Natural, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Assert, parse_assert_stmt);
    parser.stmt(TokenKind::Const, parse_const_decl_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
