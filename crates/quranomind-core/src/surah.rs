//! Surah reference table and token resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_arabic;

/// Canonical surah identifier, 1 through [`SURAH_COUNT`].
pub type SurahId = u16;

/// Number of surahs in the Quran.
pub const SURAH_COUNT: SurahId = 114;

/// Canonical Arabic and English names of a surah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahNames {
    pub arabic: String,
    pub english: String,
}

impl SurahNames {
    /// Synthesized placeholder names for a surah absent from the table.
    pub fn placeholder(id: SurahId) -> Self {
        Self {
            arabic: format!("السورة {id}"),
            english: format!("Surah {id}"),
        }
    }
}

/// Immutable surah reference table, keyed by id in ascending order.
///
/// Loaded once at startup; resolution is a pure lookup with no side
/// effects.
#[derive(Debug, Clone)]
pub struct SurahTable {
    entries: BTreeMap<SurahId, SurahNames>,
}

impl SurahTable {
    /// Load the table from a `surahs.json` file shaped
    /// `{"1": {"arabic": "...", "english": "..."}, ...}`.
    ///
    /// A missing or malformed file degrades to a fully synthesized
    /// placeholder table (logged, never fatal).
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("surah table {} unreadable ({err}), using placeholder names", path.display());
                return Self::placeholder();
            }
        };

        match serde_json::from_str::<BTreeMap<String, SurahNames>>(&raw) {
            Ok(parsed) => {
                let entries: BTreeMap<SurahId, SurahNames> = parsed
                    .into_iter()
                    .filter_map(|(key, names)| {
                        let id: SurahId = key.parse().ok()?;
                        (1..=SURAH_COUNT).contains(&id).then_some((id, names))
                    })
                    .collect();
                if entries.is_empty() {
                    tracing::warn!("surah table {} has no usable entries, using placeholder names", path.display());
                    Self::placeholder()
                } else {
                    Self { entries }
                }
            }
            Err(err) => {
                tracing::warn!("surah table {} malformed ({err}), using placeholder names", path.display());
                Self::placeholder()
            }
        }
    }

    /// Table of synthesized placeholder names for all 114 surahs.
    pub fn placeholder() -> Self {
        Self {
            entries: (1..=SURAH_COUNT)
                .map(|id| (id, SurahNames::placeholder(id)))
                .collect(),
        }
    }

    /// Build a table from explicit entries (out-of-range ids are dropped).
    pub fn from_entries(entries: impl IntoIterator<Item = (SurahId, SurahNames)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter(|(id, _)| (1..=SURAH_COUNT).contains(id))
                .collect(),
        }
    }

    /// Names for a surah, synthesizing placeholders for absent entries.
    pub fn names(&self, id: SurahId) -> SurahNames {
        self.entries
            .get(&id)
            .cloned()
            .unwrap_or_else(|| SurahNames::placeholder(id))
    }

    /// Arabic display name for a surah.
    pub fn arabic_name(&self, id: SurahId) -> String {
        self.names(id).arabic
    }

    /// Resolve a free-form token (number, Arabic name, or English name)
    /// to a surah id.
    ///
    /// Numeric tokens must be in `1..=114`. Name matching is
    /// case-insensitive and tolerant of diacritics and hamza/taa-marbuta
    /// letterform variation via [`normalize_arabic`]. The lowest matching
    /// id wins; absence is an expected outcome, not an error.
    pub fn resolve(&self, token: &str) -> Option<SurahId> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            let id: SurahId = token.parse().ok()?;
            return (1..=SURAH_COUNT).contains(&id).then_some(id);
        }

        let normalized_token = normalize_arabic(&token);
        for (id, names) in &self.entries {
            let arabic = names.arabic.trim().to_lowercase();
            let english = names.english.trim().to_lowercase();
            if token == arabic || token == english {
                return Some(*id);
            }
            if normalized_token == normalize_arabic(&arabic) {
                return Some(*id);
            }
        }

        None
    }
}
