//! On-disk layout of the corpus and favorites files.

use std::path::{Path, PathBuf};

/// Paths to the reference table, corpora, and favorites file.
///
/// Constructed once by the caller and passed into the stores — there are
/// no implicit module-level paths or caches anywhere in this crate.
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    /// Surah reference table (`surahs.json`).
    pub surahs_file: PathBuf,
    /// Directory of per-surah verse files (`<n>.json`).
    pub verses_dir: PathBuf,
    /// Directory of per-surah tafsir files for the active interpreter.
    pub tafsir_dir: PathBuf,
    /// Persisted favorites collection.
    pub favorites_file: PathBuf,
}

impl CorpusPaths {
    /// Conventional layout under a data directory:
    /// `surahs.json`, `quran_json/`, `tafasir_json/`, `favorites.json`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base = base_dir.as_ref();
        Self {
            surahs_file: base.join("surahs.json"),
            verses_dir: base.join("quran_json"),
            tafsir_dir: base.join("tafasir_json"),
            favorites_file: base.join("favorites.json"),
        }
    }

    /// Select a named interpreter's corpus (a subdirectory of the tafsir
    /// directory, e.g. `tafasir_json/ibn_katheer/`).
    ///
    /// The store only ever scans one interpreter's corpus at a time;
    /// switching interpreters is a configuration choice, not a merge.
    pub fn with_interpreter(mut self, name: &str) -> Self {
        self.tafsir_dir = self.tafsir_dir.join(name);
        self
    }
}
