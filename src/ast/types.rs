use crate::Span;

/// A type-level size parameter: a natural literal or a generic identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum TSize {
    Nat { value: u64, span: Span },
    Ident { name: String, span: Span },
}

impl TSize {
    pub fn span(&self) -> &Span {
        match self {
            TSize::Nat { span, .. } => span,
            TSize::Ident { span, .. } => span,
        }
    }
}

/// A generic argument: a natural literal or a type.
#[derive(Debug, Clone, PartialEq)]
pub enum GArg {
    Nat { value: u64, span: Span },
    Type(TypeExpr),
}

impl GArg {
    pub fn span(&self) -> &Span {
        match self {
            GArg::Nat { span, .. } => span,
            GArg::Type(ty) => ty.span(),
        }
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Boolean {
        span: Span,
    },
    Field {
        span: Span,
    },
    /// `Uint<size>`
    Uint {
        size: TSize,
        span: Span,
    },
    /// `Uint<lo..hi>`
    UintRange {
        lo: TSize,
        hi: TSize,
        span: Span,
    },
    /// `Bytes<size>`
    Bytes {
        size: TSize,
        span: Span,
    },
    /// `Opaque<"tag">`
    Opaque {
        tag: String,
        span: Span,
    },
    /// `Vector<size, element>`
    Vector {
        size: TSize,
        element: Box<TypeExpr>,
        span: Span,
    },
    /// `[type, ..., type]`
    Tuple {
        elements: Vec<TypeExpr>,
        span: Span,
    },
    /// `name` or `name<garg, ..., garg>`
    Ref {
        name: String,
        gargs: Vec<GArg>,
        span: Span,
    },
}

impl TypeExpr {
    pub fn span(&self) -> &Span {
        match self {
            TypeExpr::Boolean { span } => span,
            TypeExpr::Field { span } => span,
            TypeExpr::Uint { span, .. } => span,
            TypeExpr::UintRange { span, .. } => span,
            TypeExpr::Bytes { span, .. } => span,
            TypeExpr::Opaque { span, .. } => span,
            TypeExpr::Vector { span, .. } => span,
            TypeExpr::Tuple { span, .. } => span,
            TypeExpr::Ref { span, .. } => span,
        }
    }
}
