//! The rewrite core: classification, edit accumulation, materialization.

mod buffer;
mod classifier;
mod exclude;
mod materializer;
mod source_map;
mod tracker;
mod walker;

pub use buffer::{Insertion, RewriteBuffers};
pub use classifier::{InitDecision, TypeCategory, classify, type_category};
pub use exclude::{BUILTIN_EXCLUDE_PREFIXES, ExcludePolicy};
pub use materializer::{derive_output_path, materialize};
pub use source_map::{FileId, SourceMap};
pub use tracker::TouchedFiles;
pub use walker::DeclWalker;
