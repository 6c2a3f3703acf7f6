//! Clang front-end driver and typed AST surface.

mod compiler;
mod nodes;

pub use compiler::{
    ClangCompiler, ClangDiagnostic, Severity, parse_diagnostic_line, parse_diagnostics,
    parse_include_search_paths,
};
pub use nodes::{Clang, Node, QualType, VarDeclData, resolve_loc};
