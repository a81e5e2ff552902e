//! Membership queries: resolve a query line to a batch, then search that
//! batch.
//!
//! Grounded on `core/index.py::LineBatchedIndex.has`, including Open
//! Question 1's exact boundary behavior: a query equal to `S[0]` must route
//! to batch 0 via `floor_index`, not miss because of the `<` comparison
//! above it.

use crate::{batch::BatchedStorage, directory::Directory, search::floor_index, Result};

/// A directory plus the batched storage it indexes, ready to answer
/// membership queries.
pub struct LookupEngine {
    directory: Directory,
    storage: BatchedStorage,
}

impl LookupEngine {
    pub fn new(directory: Directory, storage: BatchedStorage) -> LookupEngine {
        LookupEngine { directory, storage }
    }

    /// `line` is given without its trailing `\n`; one is appended
    /// internally before comparison. A line containing an embedded `\n`
    /// before its end can never be a member (newline is the line
    /// terminator, not content) and returns `false` without touching disk.
    pub fn has(&self, line: &str) -> Result<bool> {
        let body = line.strip_suffix('\n').unwrap_or(line);
        if body.contains('\n') {
            return Ok(false);
        }
        let query = if line.ends_with('\n') {
            line.to_string()
        } else {
            format!("{}\n", line)
        };

        if self.directory.is_empty() {
            return Ok(false);
        }
        if query.as_str() < self.directory.separators[0].as_str() {
            return Ok(false);
        }
        if query.as_str() > self.directory.last_line.as_str() {
            return Ok(false);
        }

        let batch_number = match floor_index(&query, &self.directory.separators) {
            Some(i) => i,
            None => return Ok(false),
        };
        self.storage.get(batch_number).contains(&query)
    }
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod lookup_test;
