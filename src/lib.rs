//! `lindex` builds and queries a disk-backed, immutable index over a large
//! set of text lines.
//!
//! The index is built once, from one or more input files or an in-memory
//! iterator of lines, by merge-sorting the inputs (eliminating duplicates
//! across, not just within, files) and packing the result into a handful of
//! equi-byte-sized batch files under an output directory. A small in-memory
//! directory of batch boundaries then lets [`LookupEngine::has`] answer
//! membership queries with exactly one directory search and one in-batch
//! search, without ever holding the full line set in memory.
//!
//! Ordering throughout is byte-lexicographic (`str::as_bytes` order), not
//! locale-aware.

mod error;
mod search;
mod util;

mod batch;
mod directory;
mod lookup;
mod merge;
mod pack;

mod indexer;
mod progress;

pub use crate::batch::{Batch, BatchedStorage};
pub use crate::directory::Directory;
pub use crate::error::{Error, Result};
pub use crate::indexer::{Indexer, IndexerOptions};
pub use crate::lookup::LookupEngine;
pub use crate::merge::merge_files;
pub use crate::progress::Progress;
pub use crate::search::{ceil_index, contains, floor_index};
