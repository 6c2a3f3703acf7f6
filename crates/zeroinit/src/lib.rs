pub mod clang;
pub mod config;
pub mod rewrite;

pub use clang::{Clang, ClangCompiler, ClangDiagnostic, Node, Severity, VarDeclData};
pub use config::Config;
pub use rewrite::{
    DeclWalker, ExcludePolicy, FileId, InitDecision, RewriteBuffers, SourceMap, TouchedFiles,
    TypeCategory, classify, derive_output_path, materialize, type_category,
};
