//! quranomind-core: surah resolution and local tafsir/verse lookup.
//!
//! This crate is the shared core of the quranomind tools. It resolves
//! free-form surah tokens (numbers, Arabic names, English names) to
//! canonical surah ids, reads the local verse and tafsir corpora, scans
//! tafsir text for keywords, and keeps a small persisted favorites
//! collection.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      quranomind-core                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  normalize   │ Arabic diacritic/letterform normalization   │
//! │  surah       │ Reference table + surah token resolution    │
//! │  corpus      │ Per-surah verse and tafsir JSON store       │
//! │  search      │ Substring search over the tafsir corpus     │
//! │  favorites   │ Persisted, fingerprint-deduplicated list    │
//! │  services    │ Seams for interpretation/translation/speech │
//! │  lookup      │ Orchestration of a single lookup flow       │
//! │  repair      │ Offline corpus file repair tool             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! External collaborators (a generative interpretation source, a
//! translator, a speech synthesizer) are abstracted behind the traits in
//! [`services`]; their unavailability degrades a lookup but never fails
//! it. Corpus and favorites read failures degrade to absence as well —
//! nothing in this crate is fatal to the hosting process.

pub mod config;
pub mod corpus;
pub mod favorites;
pub mod lookup;
pub mod normalize;
pub mod repair;
pub mod search;
pub mod services;
pub mod surah;

pub use config::CorpusPaths;
pub use corpus::{CorpusError, CorpusStore};
pub use favorites::{AddOutcome, FavoriteRecord, FavoritesStore, PersistenceError, RemoveOutcome};
pub use lookup::{LookupError, LookupOptions, LookupResponse, LookupService, TafsirSource};
pub use normalize::normalize_arabic;
pub use search::{fingerprint, SearchEngine, SearchResult};
pub use services::{InterpretRequest, Interpreter, ServiceError, SpeechSynthesizer, Translator};
pub use surah::{SurahId, SurahNames, SurahTable, SURAH_COUNT};
