use crate::Span;

use super::{
    patterns::Pattern,
    statements::BlockStmt,
    types::{GArg, TypeExpr},
};

/// The parse-tree root: an ordered sequence of top-level elements. Owns
/// every descendant node.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub pelts: Vec<Pelt>,
    pub span: Span,
}

/// A top-level program element. The set of kinds is fixed by the grammar,
/// so consumers match exhaustively rather than dispatching through traits.
#[derive(Debug, Clone, PartialEq)]
pub enum Pelt {
    Pragma(PragmaDecl),
    Include(IncludeDecl),
    Module(ModuleDefn),
    Import(ImportDecl),
    ExportList(ExportDecl),
    Ledger(LedgerDecl),
    Constructor(ConstructorDefn),
    /// Placeholder for an element that failed to parse; appears only under
    /// error recovery, paired with a diagnostic.
    Error { span: Span },
}

impl Pelt {
    pub fn span(&self) -> &Span {
        match self {
            Pelt::Pragma(decl) => &decl.span,
            Pelt::Include(decl) => &decl.span,
            Pelt::Module(defn) => &defn.span,
            Pelt::Import(decl) => &decl.span,
            Pelt::ExportList(decl) => &decl.span,
            Pelt::Ledger(decl) => &decl.span,
            Pelt::Constructor(defn) => &defn.span,
            Pelt::Error { span } => span,
        }
    }
}

/// `pragma id version-constraint ;`
#[derive(Debug, Clone, PartialEq)]
pub struct PragmaDecl {
    pub name: String,
    pub constraint: VersionExpr,
    pub span: Span,
}

/// `include "file" ;`
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeDecl {
    pub file: String,
    pub span: Span,
}

/// `export? module name gparams? { pelt ... pelt }` - modules nest
/// strictly hierarchically, so the body is an owned ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefn {
    pub exported: bool,
    pub name: String,
    pub gparams: Vec<GParam>,
    pub body: Vec<Pelt>,
    pub span: Span,
}

/// A generic parameter. The `#` prefix marks a compile-time numeric
/// constant rather than a type parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct GParam {
    pub name: String,
    pub is_const: bool,
    pub span: Span,
}

/// The name position of an import: a module identifier or a file literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportName {
    Ident(String),
    File(String),
}

/// `import name gargs? prefix? ;`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub name: ImportName,
    pub gargs: Vec<GArg>,
    pub prefix: Option<String>,
    pub span: Span,
}

/// `export { id, ..., id } ;?` - the trailing semicolon is optional, a
/// deliberate asymmetry against every other terminator in the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDecl {
    pub names: Vec<String>,
    pub span: Span,
}

/// `export? sealed? ledger id : type ;`
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDecl {
    pub exported: bool,
    pub sealed: bool,
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// `constructor ( parg, ..., parg ) block ;?`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDefn {
    pub parameters: Vec<Parg>,
    pub body: BlockStmt,
    pub span: Span,
}

/// `pattern : type` - one typed constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parg {
    pub pattern: Pattern,
    pub ty: TypeExpr,
    pub span: Span,
}

/// The version-constraint boolean sub-grammar embedded in pragmas:
/// comparison atoms joined by `&&` / `||` / `!` with parenthesized
/// grouping. `||` binds loosest, then `&&`, then the unary forms.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionExpr {
    Or {
        left: Box<VersionExpr>,
        right: Box<VersionExpr>,
        span: Span,
    },
    And {
        left: Box<VersionExpr>,
        right: Box<VersionExpr>,
        span: Span,
    },
    Not {
        operand: Box<VersionExpr>,
        span: Span,
    },
    /// A prefix comparison applied to a single atom, e.g. `>=1.2.3`.
    Cmp {
        op: VersionOp,
        atom: VersionAtom,
        span: Span,
    },
    /// A bare atom with no comparison operator.
    Atom(VersionAtom),
}

impl VersionExpr {
    pub fn span(&self) -> &Span {
        match self {
            VersionExpr::Or { span, .. } => span,
            VersionExpr::And { span, .. } => span,
            VersionExpr::Not { span, .. } => span,
            VersionExpr::Cmp { span, .. } => span,
            VersionExpr::Atom(atom) => atom.span(),
        }
    }
}

/// Comparison operators usable in a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOp {
    Less,
    LessEquals,
    GreaterEquals,
    Greater,
}

/// A version-constraint atom: a bare natural or a dotted version literal
/// of one to three parts (major, minor, bugfix).
#[derive(Debug, Clone, PartialEq)]
pub enum VersionAtom {
    Nat { value: u64, span: Span },
    Version { parts: Vec<u64>, span: Span },
}

impl VersionAtom {
    pub fn span(&self) -> &Span {
        match self {
            VersionAtom::Nat { span, .. } => span,
            VersionAtom::Version { span, .. } => span,
        }
    }
}
