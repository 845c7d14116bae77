use crate::Span;

use super::types::TypeExpr;

/// Binary operator tags, one per infix token the expression grammar
/// accepts. Relational operators are non-associative; everything else in
/// this enum is left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Add,
    Sub,
    Mul,
}

/// An expression node. Children are owned exclusively; operand order is
/// semantically significant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `condition ? then_branch : else_branch`, right-associative.
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    /// Prefix `!operand`.
    Not { operand: Box<Expr>, span: Span },
    /// `value as target`. The target is parsed in type position.
    Cast {
        value: Box<Expr>,
        target: TypeExpr,
        span: Span,
    },
    /// `value[index]` - the index is restricted to a natural literal.
    Index {
        value: Box<Expr>,
        index: u64,
        span: Span,
    },
    /// `value.member`
    Member {
        value: Box<Expr>,
        member: String,
        span: Span,
    },
    /// `value.method(arguments)`
    MethodCall {
        value: Box<Expr>,
        method: String,
        arguments: Vec<Expr>,
        span: Span,
    },
    /// A natural literal, kept as its lexeme: field values may exceed any
    /// machine integer width, and the parser makes no semantic judgement.
    Natural { value: String, span: Span },
    Str { value: String, span: Span },
    Ident { name: String, span: Span },
    /// `( inner )` - retained so the parenthesis tokens stay covered by a
    /// node span.
    Grouping { inner: Box<Expr>, span: Span },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Ternary { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::Not { span, .. } => span,
            Expr::Cast { span, .. } => span,
            Expr::Index { span, .. } => span,
            Expr::Member { span, .. } => span,
            Expr::MethodCall { span, .. } => span,
            Expr::Natural { span, .. } => span,
            Expr::Str { span, .. } => span,
            Expr::Ident { span, .. } => span,
            Expr::Grouping { span, .. } => span,
        }
    }
}

/// One expression, or two or more comma-separated expressions ending in an
/// expression. Used where the grammar permits a multi-value construct:
/// `return`, `for ... of`, and condition positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprSeq {
    pub exprs: Vec<Expr>,
    pub span: Span,
}

impl ExprSeq {
    /// Whether this holds more than one expression.
    pub fn is_sequence(&self) -> bool {
        self.exprs.len() > 1
    }
}
