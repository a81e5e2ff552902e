//! The `Indexer` facade: orchestrates building a resource directory (pack
//! plus sidecars) and loading one back into a [`LookupEngine`].
//!
//! Grounded on `indexer.py::Indexer`: `__find_optimal_file_number`'s clamp
//! policy, `build_index`/`build_index_for_data`'s split between a persisted
//! build and an ephemeral one, and `delete_index`.

use std::{
    fs,
    io::BufRead,
    path::{Path, PathBuf},
};

use crate::{
    batch::BatchedStorage,
    directory::{self, Directory},
    err_at,
    lookup::LookupEngine,
    pack, progress::Progress, util, Result,
};

/// Inclusive range every file-count field must fall within.
pub const FILE_COUNT_LIMITS: (u64, u64) = (1, 1_000_000_000);
pub const DEFAULT_MIN_FILE_COUNT: u64 = 1;
pub const DEFAULT_MAX_FILE_COUNT: u64 = 1_000_000;

/// Batch count used when `wanted_file_count` is unset, per §4.7's "Default
/// 1000" policy. Not itself bounds-checked against `min`/`max` here; the
/// clamp in [`Indexer::choose_batch_count`] handles that.
const DEFAULT_WANTED_FILE_COUNT: u64 = 1000;

/// Validated batch-count configuration for an [`Indexer`].
#[derive(Clone, Copy)]
pub struct IndexerOptions {
    pub min_file_count: u64,
    pub max_file_count: u64,
    pub wanted_file_count: Option<u64>,
}

impl IndexerOptions {
    pub fn new(min_file_count: u64, max_file_count: u64, wanted_file_count: Option<u64>) -> Result<IndexerOptions> {
        let (lo, hi) = FILE_COUNT_LIMITS;
        if !(lo..=hi).contains(&min_file_count) {
            return err_at!(ConfigInvalid, msg: "min_file_count {} out of range [{}, {}]", min_file_count, lo, hi);
        }
        if !(lo..=hi).contains(&max_file_count) {
            return err_at!(ConfigInvalid, msg: "max_file_count {} out of range [{}, {}]", max_file_count, lo, hi);
        }
        if min_file_count > max_file_count {
            return err_at!(
                ConfigInvalid,
                msg: "min_file_count {} exceeds max_file_count {}", min_file_count, max_file_count
            );
        }
        if let Some(w) = wanted_file_count {
            if !(lo..=hi).contains(&w) {
                return err_at!(ConfigInvalid, msg: "wanted_file_count {} out of range [{}, {}]", w, lo, hi);
            }
            if w < min_file_count || w > max_file_count {
                return err_at!(
                    ConfigInvalid,
                    msg: "wanted_file_count {} outside [min_file_count {}, max_file_count {}]",
                    w, min_file_count, max_file_count
                );
            }
        }
        Ok(IndexerOptions { min_file_count, max_file_count, wanted_file_count })
    }
}

impl Default for IndexerOptions {
    /// `[1, 1_000_000]`, no `wanted_file_count`: always valid, so this
    /// bypasses [`IndexerOptions::new`]'s validation rather than `unwrap`
    /// it.
    fn default() -> IndexerOptions {
        IndexerOptions {
            min_file_count: DEFAULT_MIN_FILE_COUNT,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
            wanted_file_count: None,
        }
    }
}

/// Owns a resource directory and the policy for how many batches to split
/// it into; builds or loads a [`LookupEngine`] over that directory.
pub struct Indexer {
    resource_dir: PathBuf,
    options: IndexerOptions,
}

impl Indexer {
    pub fn new(resource_dir: PathBuf, options: IndexerOptions) -> Indexer {
        Indexer { resource_dir, options }
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Build the index from `file_paths`, each individually sorted and
    /// cross-file ordered (greatest line of file `k` ≤ smallest of file
    /// `k+1`). Empties the resource directory first.
    pub fn index(&self, file_paths: &[PathBuf], progress: &mut Progress) -> Result<LookupEngine> {
        if file_paths.is_empty() {
            return err_at!(EmptyInput, msg: "index() called with no input files");
        }
        let (total_bytes, total_lines) = util::count_bytes_and_lines(file_paths)?;
        if total_lines == 0 {
            return err_at!(EmptyInput, msg: "input files contain no lines");
        }

        log::info!("building index at {:?} from {} files", self.resource_dir, file_paths.len());
        util::make_empty_dir(&self.resource_dir)?;

        let n = self.choose_batch_count(total_lines);
        let width = util::hex_width(self.options.max_file_count);

        progress.report_start();
        let lines = util::line_stream(file_paths);
        let result = pack::pack_lines(lines, total_bytes, n, &self.resource_dir, width, progress)?;
        let engine = self.publish(result.last_line, result.separators, result.manifest)?;
        progress.report_done();
        log::info!("built index at {:?}", self.resource_dir);
        Ok(engine)
    }

    /// Build the index from an in-memory, already-sorted line sequence.
    /// A line missing its trailing `\n` has one appended.
    pub fn index_lines(&self, lines: &[String], progress: &mut Progress) -> Result<LookupEngine> {
        if lines.is_empty() {
            return err_at!(EmptyInput, msg: "index_lines() called with no lines");
        }

        log::info!("building index at {:?} from {} in-memory lines", self.resource_dir, lines.len());
        util::make_empty_dir(&self.resource_dir)?;

        let normalized: Vec<String> = lines
            .iter()
            .map(|line| if line.ends_with('\n') { line.clone() } else { format!("{}\n", line) })
            .collect();
        let total_bytes: u64 = normalized.iter().map(|line| util::size_of_line(line) as u64).sum();
        let total_lines = normalized.len() as u64;

        let n = self.choose_batch_count(total_lines);
        let width = util::hex_width(self.options.max_file_count);

        progress.report_start();
        let stream = normalized.into_iter().map(Ok);
        let result = pack::pack_lines(stream, total_bytes, n, &self.resource_dir, width, progress)?;
        let engine = self.publish(result.last_line, result.separators, result.manifest)?;
        progress.report_done();
        log::info!("built index at {:?}", self.resource_dir);
        Ok(engine)
    }

    /// Read `.index` and `.storage` back, binding a [`LookupEngine`] to the
    /// on-disk batches without reopening or rewriting them.
    pub fn load(&self) -> Result<LookupEngine> {
        let directory = Directory::read(&self.resource_dir)?;
        let paths = directory::read_storage(&self.resource_dir)?;
        log::info!("loaded index at {:?} ({} batches)", self.resource_dir, paths.len());
        Ok(LookupEngine::new(directory, BatchedStorage::new(paths)))
    }

    /// Construct a directory from already-laid-out batch files, without
    /// writing `.index`/`.storage`: purely in-memory, ephemeral. `paths`'
    /// ordering is trusted, not verified (Open Question 3).
    pub fn build_for_existing_data(&self, paths: &[PathBuf]) -> Result<LookupEngine> {
        if paths.is_empty() {
            return err_at!(EmptyInput, msg: "build_for_existing_data() called with no files");
        }
        log::warn!(
            "build_for_existing_data trusts caller-supplied cross-file ordering for {:?}; it is not verified",
            self.resource_dir
        );

        let mut separators = Vec::with_capacity(paths.len());
        for path in paths {
            let file = err_at!(IOError, fs::File::open(path), "open({:?})", path)?;
            let mut reader = std::io::BufReader::new(file);
            let mut first = String::new();
            let n = err_at!(IOError, reader.read_line(&mut first), "read_line({:?})", path)?;
            if n == 0 {
                return err_at!(EmptyInput, msg: "batch file {:?} has no lines", path);
            }
            separators.push(first);
        }

        let last_path = &paths[paths.len() - 1];
        let last_lines = util::read_lines(last_path)?;
        let last_line = match last_lines.last() {
            Some(line) => line.clone(),
            None => return err_at!(EmptyInput, msg: "batch file {:?} has no lines", last_path),
        };

        let directory = Directory::new(last_line, separators);
        Ok(LookupEngine::new(directory, BatchedStorage::new(paths.to_vec())))
    }

    /// Remove the resource directory and everything under it.
    pub fn delete(&self) -> Result<()> {
        util::remove_dir(&self.resource_dir)
    }

    fn publish(&self, last_line: String, separators: Vec<String>, manifest: Vec<PathBuf>) -> Result<LookupEngine> {
        let directory = Directory::new(last_line, separators);
        directory.write(&self.resource_dir)?;
        directory::write_storage(&self.resource_dir, &manifest)?;
        Ok(LookupEngine::new(directory, BatchedStorage::new(manifest)))
    }

    /// Default 1000, overridden by `wanted_file_count`, then clamped to
    /// `[min_file_count, min(max_file_count, line_count)]` since a batch
    /// must be non-empty.
    fn choose_batch_count(&self, line_count: u64) -> u64 {
        let n = self.options.wanted_file_count.unwrap_or(DEFAULT_WANTED_FILE_COUNT);
        let n = n.max(self.options.min_file_count);
        n.min(self.options.max_file_count).min(line_count.max(1))
    }
}

#[cfg(test)]
#[path = "indexer_test.rs"]
mod indexer_test;
