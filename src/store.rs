// src/store.rs
//! String-keyed persistence for the last crawl batch.
//!
//! The crawl trigger writes two entries, the renderer reads them back:
//! - `RESULTS_KEY`: JSON array of records
//! - `LAST_UPDATED_KEY`: timestamp as plain text
//!
//! Everything goes through the [`Store`] trait so the ranking/render path
//! can be exercised against [`MemoryStore`].

use std::{collections::HashMap, fs, io, path::{Path, PathBuf}};

use thiserror::Error;

use crate::config::consts::{LAST_UPDATED_KEY, RESULTS_KEY};
use crate::file::ensure_directory;
use crate::model::{CrawlBatch, CrawlRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("could not encode batch: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/* ---------------- File-backed ---------------- */

/// One file per key under a directory (default `.store/`).
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }
    pub fn dir(&self) -> &Path { &self.dir }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let ok = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !ok { return Err(StoreError::InvalidKey(s!(key))); }
        Ok(self.dir.join(key))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        ensure_directory(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/* ---------------- In-memory ---------------- */

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(s!(key), s!(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/* ---------------- Batch helpers ---------------- */

/// Overwrite the stored batch wholesale. No merge with what was there.
pub fn save_batch(store: &mut dyn Store, batch: &CrawlBatch) -> Result<(), StoreError> {
    let json = serde_json::to_string(&batch.results)?;
    store.set(RESULTS_KEY, &json)?;
    match &batch.last_updated {
        Some(ts) => store.set(LAST_UPDATED_KEY, ts)?,
        // A stale timestamp must not outlive the batch it described.
        None => store.remove(LAST_UPDATED_KEY)?,
    }
    logd!("stored {} record(s), last_updated={:?}", batch.results.len(), batch.last_updated);
    Ok(())
}

/// What the renderer finds in the store.
#[derive(Debug)]
pub enum Loaded {
    Batch(CrawlBatch),
    Missing,
    /// Present but not a JSON array of records.
    Malformed(String),
}

pub fn load_batch(store: &dyn Store) -> Result<Loaded, StoreError> {
    let Some(text) = store.get(RESULTS_KEY)? else {
        return Ok(Loaded::Missing);
    };
    let results: Vec<CrawlRecord> = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => return Ok(Loaded::Malformed(e.to_string())),
    };
    let last_updated = store.get(LAST_UPDATED_KEY)?;
    Ok(Loaded::Batch(CrawlBatch { results, last_updated }))
}

pub fn clear_batch(store: &mut dyn Store) -> Result<(), StoreError> {
    store.remove(RESULTS_KEY)?;
    store.remove(LAST_UPDATED_KEY)
}
