use tracing::debug;

use crate::clang::{Clang, Node, VarDeclData};
use crate::rewrite::buffer::RewriteBuffers;
use crate::rewrite::classifier::classify;
use crate::rewrite::exclude::ExcludePolicy;
use crate::rewrite::source_map::SourceMap;
use crate::rewrite::tracker::TouchedFiles;

/// Walks the declaration tree in document order, classifying each variable
/// declaration and queueing initializer insertions.
///
/// The walker never mutates the tree and never opens or writes files; it
/// only appends to the rewrite buffers and the touched-file set.
pub struct DeclWalker<'a> {
    sources: &'a mut SourceMap,
    buffers: &'a mut RewriteBuffers,
    touched: &'a mut TouchedFiles,
    policy: &'a ExcludePolicy,
}

impl<'a> DeclWalker<'a> {
    pub fn new(
        sources: &'a mut SourceMap,
        buffers: &'a mut RewriteBuffers,
        touched: &'a mut TouchedFiles,
        policy: &'a ExcludePolicy,
    ) -> Self {
        Self {
            sources,
            buffers,
            touched,
            policy,
        }
    }

    /// Recursively visit `node` and everything it contains.
    pub fn walk(&mut self, node: &Node) {
        match &node.kind {
            Clang::VarDecl(d) => self.visit_var_decl(d, false),
            Clang::ParmVarDecl(d) => self.visit_var_decl(d, true),
            Clang::Other { .. } => {}
        }

        for child in &node.inner {
            self.walk(child);
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDeclData, is_parameter: bool) {
        if decl.is_implicit() {
            return;
        }

        let Some(text) = classify(decl, is_parameter).text() else {
            return;
        };

        let Some((file, offset)) = decl.insertion_point() else {
            debug!("no usable end location for `{}`, skipping", decl.name().unwrap_or("<unnamed>"));
            return;
        };

        let file_id = self.sources.intern(file);
        self.buffers.insert_after(file_id, offset, text);
        self.mark_file_for_decl(decl);
    }

    /// Record the file owning this declaration's location, so it gets
    /// materialized later. System headers never enter the set.
    fn mark_file_for_decl(&mut self, decl: &VarDeclData) {
        let Some(path) = decl.location_file() else {
            return;
        };
        let file_id = self.sources.intern(path);
        self.touched.mark_touched(file_id, path, self.policy);
    }
}
