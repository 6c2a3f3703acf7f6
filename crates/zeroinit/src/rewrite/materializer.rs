use std::fs;

use tracing::{debug, error, info, warn};

use crate::rewrite::buffer::RewriteBuffers;
use crate::rewrite::exclude::ExcludePolicy;
use crate::rewrite::source_map::SourceMap;
use crate::rewrite::tracker::TouchedFiles;

/// Write one `_out` sibling per touched file.
///
/// Per file: resolve the identity to a path, apply the exclusion policy,
/// fetch the accumulated edits (a file marked touched without buffered edits
/// materializes as its unmodified content), derive the output name, write.
/// Every failure is file-local: it is reported and the remaining files still
/// get processed. Returns the number of files written.
pub fn materialize(
    touched: &TouchedFiles,
    buffers: &RewriteBuffers,
    sources: &SourceMap,
    policy: &ExcludePolicy,
) -> usize {
    let mut written = 0;

    for file_id in touched.iter() {
        let Some(path) = sources.path_of(file_id) else {
            warn!("failed to find the file entry for {file_id:?}");
            continue;
        };
        if policy.is_excluded_output(path) {
            debug!("ignoring {path}");
            continue;
        }

        // Clang pseudo-files like `<built-in>` land here too; the read fails
        // and the file is skipped like any other unreadable entry.
        let original = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("failed to read {path}: {e}");
                continue;
            }
        };

        let content = match buffers.edits_for(file_id) {
            Some(edits) => RewriteBuffers::apply(&original, edits),
            None => original,
        };

        let out_path = derive_output_path(path);
        if let Err(e) = fs::write(&out_path, content) {
            error!("cannot open {out_path} for writing: {e}");
            continue;
        }

        info!("Output to: {out_path}");
        written += 1;
    }

    written
}

/// Derive the sibling output name: `_out` goes immediately before the first
/// `.` of the final path component, or at the end when there is none.
///
/// `foo.c` becomes `foo_out.c`, `archive.tar.gz` becomes
/// `archive_out.tar.gz`, `foo` becomes `foo_out`.
pub fn derive_output_path(path: &str) -> String {
    let component_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match path[component_start..].find('.') {
        Some(dot) => {
            let at = component_start + dot;
            format!("{}_out{}", &path[..at], &path[at..])
        }
        None => format!("{path}_out"),
    }
}

#[cfg(test)]
#[path = "../../tests/src/rewrite/materializer_tests.rs"]
mod tests;
