//! Persisted favorites collection, deduplicated by content fingerprint.
//!
//! The whole collection is read into memory, mutated, and written back as
//! one unit on every change. Single-user, single-process tool: there is
//! no locking, and a racing writer can lose the other's update.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::search::SearchResult;
use crate::surah::SurahId;

/// A saved lookup/search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub surah_name: String,
    pub surah_number: SurahId,
    pub ayah_number: u32,
    pub ayah_text: Option<String>,
    pub tafsir: String,
    /// Display language the result was viewed in.
    pub lang: String,
    /// Interpreter/source the tafsir came from.
    pub interpreter: String,
    pub translated: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Content fingerprint; the collection's identity key.
    pub hash: String,
}

impl FavoriteRecord {
    /// Build a record from a search result at the current time.
    pub fn from_result(result: &SearchResult, lang: &str, interpreter: &str) -> Self {
        Self {
            surah_name: result.surah_name.clone(),
            surah_number: result.surah_id,
            ayah_number: result.ayah_number,
            ayah_text: result.verse_text.clone(),
            tafsir: result.tafsir_text.clone(),
            lang: lang.to_string(),
            interpreter: interpreter.to_string(),
            translated: None,
            timestamp: Utc::now(),
            hash: result.fingerprint.clone(),
        }
    }
}

/// Outcome of an add: idempotent by fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Outcome of a remove by fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Failure to persist the favorites collection.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write favorites to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-file JSON store for [`FavoriteRecord`]s.
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All records, in stored order. A missing or malformed file yields
    /// an empty collection (logged, never fatal).
    pub fn list(&self) -> Vec<FavoriteRecord> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!("favorites {} unreadable ({err}), starting empty", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("favorites {} malformed ({err}), starting empty", self.path.display());
                Vec::new()
            }
        }
    }

    /// Whether a record with this fingerprint is stored.
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.list().iter().any(|fav| fav.hash == fingerprint)
    }

    /// Add a record unless its fingerprint is already present.
    pub fn add(&self, record: FavoriteRecord) -> Result<AddOutcome, PersistenceError> {
        let mut records = self.list();
        if records.iter().any(|fav| fav.hash == record.hash) {
            return Ok(AddOutcome::AlreadyExists);
        }
        records.push(record);
        self.write_all(&records)?;
        Ok(AddOutcome::Added)
    }

    /// Remove the record with this fingerprint, if any.
    pub fn remove(&self, fingerprint: &str) -> Result<RemoveOutcome, PersistenceError> {
        let mut records = self.list();
        let Some(pos) = records.iter().position(|fav| fav.hash == fingerprint) else {
            return Ok(RemoveOutcome::NotFound);
        };
        records.remove(pos);
        self.write_all(&records)?;
        Ok(RemoveOutcome::Removed)
    }

    /// Rewrite the whole collection atomically: serialize into a temp
    /// file next to the target, then rename over it.
    fn write_all(&self, records: &[FavoriteRecord]) -> Result<(), PersistenceError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let temp = NamedTempFile::new_in(parent).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(&temp, records)?;
        temp.persist(&self.path)
            .map_err(|err| PersistenceError::Io {
                path: self.path.clone(),
                source: err.error,
            })?;
        tracing::debug!("saved {} favorites to {}", records.len(), self.path.display());
        Ok(())
    }
}
