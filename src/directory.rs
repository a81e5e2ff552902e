//! The `(last_line, separators)` sparse directory, and the `.index` /
//! `.storage` sidecar formats.
//!
//! Grounded on `indexer.py`'s `__read_index_data`/`__write_index_data`/
//! `__read_storage_data`/`__write_storage_data`: formats are preserved
//! byte-for-byte, including Open Question 2's verbatim `.storage` path
//! strings (no normalization on read or write).

use std::{fs, path::Path, path::PathBuf};

use crate::{err_at, util, Result};

const INDEX_FILE: &str = ".index";
const STORAGE_FILE: &str = ".storage";

/// The sparse in-memory key directory: the last line across all batches,
/// plus the first line of each batch.
pub struct Directory {
    pub last_line: String,
    pub separators: Vec<String>,
}

impl Directory {
    pub fn new(last_line: String, separators: Vec<String>) -> Directory {
        Directory { last_line, separators }
    }

    pub fn len(&self) -> usize {
        self.separators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }

    /// Write the `.index` sidecar: `last_line\n`, `N\n`, then `N` separator
    /// lines.
    pub fn write(&self, resource_dir: &Path) -> Result<()> {
        let path = resource_dir.join(INDEX_FILE);
        let mut buf = String::new();
        buf.push_str(&self.last_line);
        buf.push_str(&format!("{}\n", self.separators.len()));
        for sep in &self.separators {
            buf.push_str(sep);
        }
        let mut file = err_at!(IOError, fs::File::create(&path), "create({:?})", path)?;
        util::sync_write(&mut file, buf.as_bytes())?;
        Ok(())
    }

    /// Read the `.index` sidecar back.
    pub fn read(resource_dir: &Path) -> Result<Directory> {
        let path = resource_dir.join(INDEX_FILE);
        let lines = util::read_lines(&path)?;
        if lines.len() < 2 {
            return err_at!(InvalidFile, msg: "truncated index file {:?}", path);
        }
        let last_line = lines[0].clone();
        let n: usize = err_at!(InvalidFile, lines[1].trim_end().parse::<usize>(), "bad separator count in {:?}", path)?;
        let separators = lines[2..].to_vec();
        if separators.len() != n {
            return err_at!(
                InvalidFile,
                msg: "index file {:?} declares {} separators but has {}", path, n, separators.len()
            );
        }
        Ok(Directory::new(last_line, separators))
    }
}

/// Write the `.storage` sidecar: one path per line, in batch-number order.
pub fn write_storage(resource_dir: &Path, paths: &[PathBuf]) -> Result<()> {
    let path = resource_dir.join(STORAGE_FILE);
    let mut buf = String::new();
    for p in paths {
        buf.push_str(&p.to_string_lossy());
        buf.push('\n');
    }
    let mut file = err_at!(IOError, fs::File::create(&path), "create({:?})", path)?;
    util::sync_write(&mut file, buf.as_bytes())?;
    Ok(())
}

/// Read the `.storage` sidecar: trailing newlines stripped, paths kept
/// exactly as written.
pub fn read_storage(resource_dir: &Path) -> Result<Vec<PathBuf>> {
    let path = resource_dir.join(STORAGE_FILE);
    let lines = util::read_lines(&path)?;
    Ok(lines
        .into_iter()
        .map(|line| PathBuf::from(line.trim_end_matches('\n')))
        .collect())
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;
