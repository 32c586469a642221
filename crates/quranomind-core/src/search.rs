//! Keyword search over the local tafsir corpus.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::corpus::CorpusStore;
use crate::surah::{SurahId, SurahTable, SURAH_COUNT};

/// One tafsir entry matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub surah_id: SurahId,
    pub surah_name: String,
    pub ayah_number: u32,
    /// Verse text, absent when not locally available.
    pub verse_text: Option<String>,
    pub tafsir_text: String,
    /// Content fingerprint; identity key for favorites.
    pub fingerprint: String,
}

/// Deterministic content fingerprint of a (surah, ayah, tafsir) triple.
///
/// SHA-256 hex over `"{surah}-{ayah}-{tafsir}"`: identical content always
/// yields the identical fingerprint, and any wording change yields a
/// different one.
pub fn fingerprint(surah: SurahId, ayah: u32, tafsir_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{surah}-{ayah}-").as_bytes());
    hasher.update(tafsir_text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Full-scan substring search over the active tafsir corpus.
///
/// No index is built or maintained: every query walks all 114 surah
/// tables. Acceptable because the corpus is small and static.
pub struct SearchEngine<'a> {
    store: &'a CorpusStore,
    table: &'a SurahTable,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a CorpusStore, table: &'a SurahTable) -> Self {
        Self { store, table }
    }

    /// Case-insensitive substring search.
    ///
    /// Results come back in ascending (surah, ayah) order — deterministic
    /// and stable across runs for an unchanged corpus. A blank query or a
    /// query with no matches yields an empty vec; neither is an error.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for surah in 1..=SURAH_COUNT {
            let entries = self.store.tafsir_entries(surah);
            if entries.is_empty() {
                continue;
            }

            let surah_name = self.table.arabic_name(surah);
            for (&ayah, tafsir_text) in entries.iter() {
                if !tafsir_text.to_lowercase().contains(&query) {
                    continue;
                }
                let verse_text = match self.store.get_verse(surah, ayah) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("verse join failed for {surah}:{ayah}: {err}");
                        None
                    }
                };
                results.push(SearchResult {
                    surah_id: surah,
                    surah_name: surah_name.clone(),
                    ayah_number: ayah,
                    verse_text,
                    tafsir_text: tafsir_text.clone(),
                    fingerprint: fingerprint(surah, ayah, tafsir_text),
                });
            }
        }
        results
    }
}
