//! Streams an ordered, deduplicated line sequence into `n` equi-byte-sized
//! batch files, collecting the separator (first line) of each.
//!
//! Grounded on `indexer.py::Indexer.__index`'s packing loop, restated per
//! `spec.md` §4.4's exact triggering rule rather than transliterated: the
//! original re-derives `S[0]` via a second pass over a fresh generator,
//! which a single-stream Rust iterator has no need to do.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{err_at, progress::Progress, util, util::BatchFileName, Result};

/// Result of packing: the last line written, the separator list (one entry
/// per produced batch), and the manifest of batch file paths in order.
pub struct PackResult {
    pub last_line: String,
    pub separators: Vec<String>,
    pub manifest: Vec<PathBuf>,
}

/// Pack `lines` (already ordered, deduplicated, each ending in `\n`) into
/// at most `n` batch files of total byte size `total_bytes` under
/// `resource_dir`. `width` is the hex digit width used for batch filenames.
///
/// If the stream is exhausted before `n` batches are filled, fewer batches
/// are produced (`manifest.len() <= n`); this is not an error.
///
/// `progress` is reported once per closed batch, as `(file_number + 1) / n`.
pub fn pack_lines<I>(
    mut lines: I,
    total_bytes: u64,
    n: u64,
    resource_dir: &Path,
    width: usize,
    progress: &mut Progress,
) -> Result<PackResult>
where
    I: Iterator<Item = Result<String>>,
{
    if n == 0 {
        return err_at!(ConfigInvalid, msg: "batch count must be at least 1");
    }

    let mut separators = Vec::new();
    let mut manifest = Vec::new();
    let mut last_line = String::new();

    // `total_processed` runs across the whole stream, not per batch: a
    // triggering line is counted here the moment it is seen even though it
    // is written only at the top of the next batch.
    let mut pending = match lines.next() {
        Some(line) => line?,
        None => return err_at!(EmptyInput, msg: "no lines to pack"),
    };
    let mut total_processed = util::size_of_line(&pending) as u64;
    separators.push(pending.clone());

    for file_number in 0..n {
        let is_last_batch = file_number + 1 == n;
        let current_limit = total_bytes * (file_number + 1) / n;

        let file_name: std::ffi::OsString = BatchFileName::encode(file_number, width).into();
        let path = resource_dir.join(file_name);
        manifest.push(path.clone());
        let mut file = err_at!(IOError, fs::File::create(&path), "create({:?})", path)?;

        err_at!(IOError, file.write_all(pending.as_bytes()), "write({:?})", path)?;
        last_line = pending;

        loop {
            match lines.next() {
                None => {
                    err_at!(IOError, file.sync_all(), "sync({:?})", path)?;
                    progress.report((file_number + 1) as f64 / n as f64);
                    return Ok(PackResult { last_line, separators, manifest });
                }
                Some(line) => {
                    let line = line?;
                    total_processed += util::size_of_line(&line) as u64;
                    if !is_last_batch && total_processed > current_limit {
                        pending = line;
                        separators.push(pending.clone());
                        break;
                    } else {
                        err_at!(IOError, file.write_all(line.as_bytes()), "write({:?})", path)?;
                        last_line = line;
                    }
                }
            }
        }
        err_at!(IOError, file.sync_all(), "sync({:?})", path)?;
        log::debug!("closed batch {} ({} bytes planned)", file_number, current_limit);
        progress.report((file_number + 1) as f64 / n as f64);
    }

    err_at!(Fatal, msg: "packer reached end of planned batches without exhausting input")
}

#[cfg(test)]
#[path = "pack_test.rs"]
mod pack_test;
