//! A single sorted batch file, and a read-only collection of them indexed
//! by batch number.
//!
//! Grounded on `core/batched_storage.py`'s `FileLineBatch`/
//! `FileLineBatchedStorage`: `smallest`/`greatest` are cached after first
//! access, `contains`/`floor`/`ceil` re-read the file each call and apply
//! the §4.1 search routines.

use fs2::FileExt;

use std::{cell::RefCell, fs, path::PathBuf};

use crate::{
    err_at,
    search::{ceil_index, contains, floor_index},
    util, Result,
};

/// One on-disk sorted, deduplicated, newline-terminated line file.
pub struct Batch {
    path: PathBuf,
    smallest: RefCell<Option<String>>,
    greatest: RefCell<Option<String>>,
}

impl Batch {
    pub fn new(path: PathBuf) -> Batch {
        Batch {
            path,
            smallest: RefCell::new(None),
            greatest: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// First line of the batch, including trailing `\n`. Cached after the
    /// first call.
    pub fn smallest(&self) -> Result<String> {
        if let Some(line) = self.smallest.borrow().as_ref() {
            return Ok(line.clone());
        }
        let lines = self.load_lines()?;
        let first = match lines.first() {
            Some(line) => line.clone(),
            None => return err_at!(Fatal, msg: "empty batch {:?}", self.path),
        };
        *self.smallest.borrow_mut() = Some(first.clone());
        Ok(first)
    }

    /// Last line of the batch, including trailing `\n`. Cached after the
    /// first call.
    pub fn greatest(&self) -> Result<String> {
        if let Some(line) = self.greatest.borrow().as_ref() {
            return Ok(line.clone());
        }
        let lines = self.load_lines()?;
        let last = match lines.last() {
            Some(line) => line.clone(),
            None => return err_at!(Fatal, msg: "empty batch {:?}", self.path),
        };
        *self.greatest.borrow_mut() = Some(last.clone());
        Ok(last)
    }

    pub fn contains(&self, line: &str) -> Result<bool> {
        let lines = self.load_lines()?;
        Ok(contains(&line.to_string(), &lines))
    }

    pub fn floor(&self, line: &str) -> Result<Option<String>> {
        let lines = self.load_lines()?;
        Ok(floor_index(&line.to_string(), &lines).map(|i| lines[i].clone()))
    }

    pub fn ceil(&self, line: &str) -> Result<Option<String>> {
        let lines = self.load_lines()?;
        Ok(ceil_index(&line.to_string(), &lines).map(|i| lines[i].clone()))
    }

    /// Open, shared-lock, read every line, unlock, close. Holding the
    /// handle open beyond the call is not part of this crate's contract
    /// (§5 File handles), so each lookup pays the cost of a fresh read.
    fn load_lines(&self) -> Result<Vec<String>> {
        let file = err_at!(IOError, fs::File::open(&self.path), "open({:?})", self.path)?;
        err_at!(IOError, file.lock_shared(), "lock_shared({:?})", self.path)?;
        let lines = util::read_lines(&self.path)?;
        err_at!(IOError, file.unlock(), "unlock({:?})", self.path)?;
        Ok(lines)
    }
}

/// Read-only collection of [`Batch`]es, indexed by batch number, built from
/// the storage manifest.
pub struct BatchedStorage {
    batches: Vec<Batch>,
}

impl BatchedStorage {
    pub fn new(paths: Vec<PathBuf>) -> BatchedStorage {
        BatchedStorage {
            batches: paths.into_iter().map(Batch::new).collect(),
        }
    }

    pub fn get(&self, batch_number: usize) -> &Batch {
        &self.batches[batch_number]
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;
