use std::collections::BTreeSet;

use tracing::debug;

use crate::rewrite::exclude::ExcludePolicy;
use crate::rewrite::source_map::FileId;

/// The set of files that received at least one edit.
///
/// Built incrementally during the single traversal pass, consumed once by
/// the materializer. Entries are never removed; iteration order is the
/// identity order, which is deterministic.
#[derive(Debug, Default)]
pub struct TouchedFiles {
    files: BTreeSet<FileId>,
}

impl TouchedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `file` as touched, unless its location classifies as a system
    /// header at this moment.
    pub fn mark_touched(&mut self, file: FileId, path: &str, policy: &ExcludePolicy) {
        if policy.is_system_header(path) {
            debug!("not tracking system header {path}");
            return;
        }
        self.files.insert(file);
    }

    pub fn iter(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.iter().copied()
    }

    pub fn contains(&self, file: FileId) -> bool {
        self.files.contains(&file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/rewrite/tracker_tests.rs"]
mod tests;
