/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the parse tree structure
///
/// Submodules:
/// - program: The Program root and top-level element (pelt) definitions
/// - statements: Definitions for statement and block nodes
/// - expressions: Definitions for expression nodes
/// - patterns: Definitions for destructuring pattern nodes
/// - types: Definitions for type expressions and generic arguments
pub mod expressions;
pub mod patterns;
pub mod program;
pub mod statements;
pub mod types;
