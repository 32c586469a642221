//! Read-only store over the per-surah verse and tafsir corpora.
//!
//! Each surah is one JSON file `<id>.json` mapping decimal-string ayah
//! numbers to text. A missing file is a valid state (the surah simply has
//! no local data); an unreadable or malformed file is a [`CorpusError`],
//! kept distinct so callers can tell a read failure from a legitimately
//! absent verse.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::config::CorpusPaths;
use crate::surah::SurahId;

/// Ayah-number-to-text map for one surah, in ascending ayah order.
pub type AyahMap = BTreeMap<u32, String>;

/// Failure to read one surah's corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Cached accessor over the verse and tafsir corpora.
///
/// Surah files are loaded on first access and cached for the process
/// lifetime; the corpus is assumed static during a session. [`reload`]
/// drops every cache for an explicit, caller-driven refresh.
///
/// [`reload`]: CorpusStore::reload
pub struct CorpusStore {
    paths: CorpusPaths,
    verses: RwLock<HashMap<SurahId, Arc<AyahMap>>>,
    tafsir: RwLock<HashMap<SurahId, Arc<AyahMap>>>,
}

impl CorpusStore {
    pub fn new(paths: CorpusPaths) -> Self {
        Self {
            paths,
            verses: RwLock::new(HashMap::new()),
            tafsir: RwLock::new(HashMap::new()),
        }
    }

    /// Verse text for (surah, ayah). `Ok(None)` when the surah has no
    /// local verse file or the ayah key is missing.
    pub fn get_verse(&self, surah: SurahId, ayah: u32) -> Result<Option<String>, CorpusError> {
        Ok(self.verse_entries(surah)?.get(&ayah).cloned())
    }

    /// Tafsir text for (surah, ayah). Same absence semantics as
    /// [`get_verse`](CorpusStore::get_verse).
    pub fn get_tafsir(&self, surah: SurahId, ayah: u32) -> Result<Option<String>, CorpusError> {
        Ok(self
            .strict_entries(&self.tafsir, &self.paths.tafsir_dir, surah)?
            .get(&ayah)
            .cloned())
    }

    /// Number of ayahs present in the surah's verse table (0 when the
    /// file is missing or unreadable — lenient by design).
    pub fn count_ayahs(&self, surah: SurahId) -> usize {
        match self.verse_entries(surah) {
            Ok(entries) => entries.len(),
            Err(err) => {
                tracing::warn!("counting ayahs for surah {surah}: {err}");
                0
            }
        }
    }

    /// All tafsir entries for a surah, lenient: read failures log a
    /// warning and yield an empty map. Used by the search scan, which
    /// must tolerate individually broken surah files.
    pub fn tafsir_entries(&self, surah: SurahId) -> Arc<AyahMap> {
        match self.strict_entries(&self.tafsir, &self.paths.tafsir_dir, surah) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("skipping tafsir for surah {surah}: {err}");
                Arc::new(AyahMap::new())
            }
        }
    }

    /// Drop every cached surah; subsequent lookups re-read from disk.
    pub fn reload(&self) {
        self.verses.write().unwrap_or_else(|e| e.into_inner()).clear();
        self.tafsir.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn verse_entries(&self, surah: SurahId) -> Result<Arc<AyahMap>, CorpusError> {
        self.strict_entries(&self.verses, &self.paths.verses_dir, surah)
    }

    fn strict_entries(
        &self,
        cache: &RwLock<HashMap<SurahId, Arc<AyahMap>>>,
        dir: &Path,
        surah: SurahId,
    ) -> Result<Arc<AyahMap>, CorpusError> {
        if let Some(entries) = cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&surah)
        {
            return Ok(Arc::clone(entries));
        }

        let entries = Arc::new(load_surah_file(dir, surah)?);
        cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(surah, Arc::clone(&entries));
        Ok(entries)
    }
}

/// Load one surah file from a corpus directory. A missing file yields an
/// empty map; only I/O and parse failures are errors.
fn load_surah_file(dir: &Path, surah: SurahId) -> Result<AyahMap, CorpusError> {
    let path = dir.join(format!("{surah}.json"));
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no corpus file for surah {surah} at {}", path.display());
            return Ok(AyahMap::new());
        }
        Err(source) => return Err(CorpusError::Io { path, source }),
    };

    let parsed: HashMap<String, String> =
        serde_json::from_str(&raw).map_err(|source| CorpusError::Malformed {
            path: path.clone(),
            source,
        })?;

    let mut entries = AyahMap::new();
    for (key, text) in parsed {
        match key.trim().parse::<u32>() {
            Ok(ayah) if ayah > 0 => {
                entries.insert(ayah, text);
            }
            _ => {
                // Some converted files carry free-text keys; those belong
                // to the repair tool, not the read path.
                tracing::debug!("skipping non-numeric ayah key {key:?} in {}", path.display());
            }
        }
    }
    Ok(entries)
}
