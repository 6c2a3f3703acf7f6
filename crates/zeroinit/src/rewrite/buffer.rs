use std::collections::HashMap;

use tracing::warn;

use crate::rewrite::source_map::FileId;

/// One queued text insertion: `text` goes in at byte `offset`.
#[derive(Debug, Clone)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

/// Accumulated insertions, keyed by file identity.
///
/// Append-only: the walker queues insertions during traversal, the
/// materializer reads them afterwards. No deletions or replacements exist.
#[derive(Debug, Default)]
pub struct RewriteBuffers {
    buffers: HashMap<FileId, Vec<Insertion>>,
}

impl RewriteBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `text` for insertion at `offset` in `file`.
    pub fn insert_after(&mut self, file: FileId, offset: usize, text: &str) {
        self.buffers.entry(file).or_default().push(Insertion {
            offset,
            text: text.to_owned(),
        });
    }

    /// The insertions queued for `file`, in the order they were requested.
    pub fn edits_for(&self, file: FileId) -> Option<&[Insertion]> {
        self.buffers.get(&file).map(Vec::as_slice)
    }

    /// Splice `insertions` into `original`, ascending by offset.
    ///
    /// The sort is stable, so insertions at the same offset keep their
    /// request order. Offsets past the end clamp to the end; an offset that
    /// does not land on a character boundary drops that insertion with a
    /// warning rather than corrupting the file.
    pub fn apply(original: &str, insertions: &[Insertion]) -> String {
        let mut ordered: Vec<&Insertion> = insertions.iter().collect();
        ordered.sort_by_key(|ins| ins.offset);

        let extra: usize = ordered.iter().map(|ins| ins.text.len()).sum();
        let mut out = String::with_capacity(original.len() + extra);
        let mut cursor = 0usize;

        for ins in ordered {
            let offset = ins.offset.min(original.len());
            match original.get(cursor..offset) {
                Some(chunk) => {
                    out.push_str(chunk);
                    out.push_str(&ins.text);
                    cursor = offset;
                }
                None => {
                    warn!("insertion at byte {} is not on a character boundary, dropped", ins.offset);
                }
            }
        }

        out.push_str(&original[cursor..]);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/src/rewrite/buffer_tests.rs"]
mod tests;
