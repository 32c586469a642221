//! Orchestration of a single verse/tafsir lookup.
//!
//! Mirrors what every front-end does: resolve the surah token, fetch the
//! verse and local tafsir, fall back to the generative interpretation
//! source when the local corpus has nothing, then optionally translate
//! and synthesize audio. Service failures degrade the response and are
//! collected as soft warnings for the caller to display.

use thiserror::Error;

use crate::corpus::CorpusStore;
use crate::favorites::FavoritesStore;
use crate::search::{fingerprint, SearchEngine, SearchResult};
use crate::services::{InterpretRequest, Interpreter, SpeechSynthesizer, Translator};
use crate::surah::{SurahId, SurahTable};

/// Where the returned tafsir text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TafsirSource {
    /// The active local corpus.
    Local,
    /// The configured generative interpretation source.
    Generated,
}

/// Per-request options.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Target language for the optional translation, `None` to skip.
    pub translate_to: Option<String>,
    /// Synthesize audio for the tafsir text.
    pub with_audio: bool,
    /// Display name of the requested interpretation style, passed through
    /// to the generative source on fallback.
    pub interpreter_name: String,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            translate_to: None,
            with_audio: false,
            interpreter_name: "maissar".to_string(),
        }
    }
}

/// A completed lookup.
#[derive(Debug, Clone)]
pub struct LookupResponse {
    pub surah_id: SurahId,
    pub surah_name: String,
    pub ayah_number: u32,
    pub verse_text: Option<String>,
    pub tafsir: Option<String>,
    pub tafsir_source: Option<TafsirSource>,
    pub translated: Option<String>,
    pub audio: Option<Vec<u8>>,
    /// Fingerprint of the tafsir, when any was found.
    pub fingerprint: Option<String>,
    /// Whether the result is already in the favorites collection.
    pub is_favorite: bool,
    /// Soft warnings (degraded reads, failed service calls) for display.
    pub warnings: Vec<String>,
}

/// Lookup failures the caller must handle.
///
/// Everything else — absent tafsir, failed translation, unreadable corpus
/// files — degrades inside the response instead of erroring.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("surah token {0:?} did not resolve")]
    SurahNotFound(String),
}

/// The wired-up core: reference table, corpora, favorites, and the
/// optional external services.
pub struct LookupService {
    table: SurahTable,
    store: CorpusStore,
    favorites: FavoritesStore,
    interpreter: Option<Box<dyn Interpreter>>,
    translator: Option<Box<dyn Translator>>,
    speech: Option<Box<dyn SpeechSynthesizer>>,
}

impl LookupService {
    pub fn new(table: SurahTable, store: CorpusStore, favorites: FavoritesStore) -> Self {
        Self {
            table,
            store,
            favorites,
            interpreter: None,
            translator: None,
            speech: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: Box<dyn Interpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_speech(mut self, speech: Box<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn surah_table(&self) -> &SurahTable {
        &self.table
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.store
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Look up one ayah by surah token and ayah number.
    pub fn lookup(
        &self,
        surah_token: &str,
        ayah_number: u32,
        options: &LookupOptions,
    ) -> Result<LookupResponse, LookupError> {
        let surah_id = self
            .table
            .resolve(surah_token)
            .ok_or_else(|| LookupError::SurahNotFound(surah_token.to_string()))?;
        let surah_name = self.table.arabic_name(surah_id);
        let mut warnings = Vec::new();

        let verse_text = match self.store.get_verse(surah_id, ayah_number) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("verse read failed for {surah_id}:{ayah_number}: {err}");
                warnings.push(format!("verse corpus unreadable for surah {surah_id}"));
                None
            }
        };

        let local_tafsir = match self.store.get_tafsir(surah_id, ayah_number) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("tafsir read failed for {surah_id}:{ayah_number}: {err}");
                warnings.push(format!("tafsir corpus unreadable for surah {surah_id}"));
                None
            }
        };

        let (tafsir, tafsir_source) = match local_tafsir {
            Some(text) => (Some(text), Some(TafsirSource::Local)),
            None => match &self.interpreter {
                Some(interpreter) => {
                    let request = InterpretRequest {
                        surah_id,
                        surah_name: &surah_name,
                        ayah_number,
                        verse_text: verse_text.as_deref(),
                        interpreter_name: &options.interpreter_name,
                    };
                    match interpreter.interpret(&request) {
                        Ok(text) => (Some(text), Some(TafsirSource::Generated)),
                        Err(err) => {
                            warnings.push(format!(
                                "interpretation source {} failed: {err}",
                                interpreter.name()
                            ));
                            (None, None)
                        }
                    }
                }
                None => (None, None),
            },
        };

        let fingerprint = tafsir
            .as_deref()
            .map(|text| fingerprint(surah_id, ayah_number, text));
        let is_favorite = fingerprint
            .as_deref()
            .map(|fp| self.favorites.contains(fp))
            .unwrap_or(false);

        let translated = match (&tafsir, &options.translate_to, &self.translator) {
            (Some(text), Some(lang), Some(translator)) => match translator.translate(text, lang) {
                Ok(translated) => Some(translated),
                Err(err) => {
                    warnings.push(format!("translation failed: {err}"));
                    None
                }
            },
            _ => None,
        };

        let audio = match (&tafsir, options.with_audio, &self.speech) {
            (Some(text), true, Some(speech)) => match speech.synthesize(text, "ar") {
                Ok(audio) => Some(audio),
                Err(err) => {
                    warnings.push(format!("speech synthesis failed: {err}"));
                    None
                }
            },
            _ => None,
        };

        Ok(LookupResponse {
            surah_id,
            surah_name,
            ayah_number,
            verse_text,
            tafsir,
            tafsir_source,
            translated,
            audio,
            fingerprint,
            is_favorite,
            warnings,
        })
    }

    /// Keyword search over the active tafsir corpus.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        SearchEngine::new(&self.store, &self.table).search(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusPaths;
    use crate::services::ServiceError;
    use std::fs;

    struct CannedInterpreter(Result<String, ()>);

    impl Interpreter for CannedInterpreter {
        fn name(&self) -> &str {
            "canned"
        }
        fn interpret(&self, _request: &InterpretRequest<'_>) -> Result<String, ServiceError> {
            self.0
                .clone()
                .map_err(|_| ServiceError::Unavailable("down".to_string()))
        }
    }

    struct UpcasingTranslator;

    impl Translator for UpcasingTranslator {
        fn translate(&self, text: &str, _target_lang: &str) -> Result<String, ServiceError> {
            Ok(text.to_uppercase())
        }
    }

    fn service(tafsir_json: Option<&str>) -> (tempfile::TempDir, LookupService) {
        let dir = tempfile::tempdir().unwrap();
        let paths = CorpusPaths::new(dir.path());
        fs::create_dir_all(&paths.verses_dir).unwrap();
        fs::create_dir_all(&paths.tafsir_dir).unwrap();
        fs::write(
            paths.verses_dir.join("1.json"),
            r#"{"1": "بسم الله الرحمن الرحيم"}"#,
        )
        .unwrap();
        if let Some(json) = tafsir_json {
            fs::write(paths.tafsir_dir.join("1.json"), json).unwrap();
        }
        let favorites = FavoritesStore::new(&paths.favorites_file);
        let store = CorpusStore::new(paths);
        (
            dir,
            LookupService::new(SurahTable::placeholder(), store, favorites),
        )
    }

    #[test]
    fn local_tafsir_wins() {
        let (_dir, service) = service(Some(r#"{"1": "تفسير آية البسملة"}"#));
        let service =
            service.with_interpreter(Box::new(CannedInterpreter(Ok("generated".to_string()))));
        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert_eq!(response.tafsir.as_deref(), Some("تفسير آية البسملة"));
        assert_eq!(response.tafsir_source, Some(TafsirSource::Local));
        assert!(response.fingerprint.is_some());
        assert!(response.warnings.is_empty());
    }

    #[test]
    fn falls_back_to_interpreter_when_local_absent() {
        let (_dir, service) = service(None);
        let service =
            service.with_interpreter(Box::new(CannedInterpreter(Ok("generated".to_string()))));
        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert_eq!(response.tafsir.as_deref(), Some("generated"));
        assert_eq!(response.tafsir_source, Some(TafsirSource::Generated));
    }

    #[test]
    fn interpreter_failure_degrades_to_warning() {
        let (_dir, service) = service(None);
        let service = service.with_interpreter(Box::new(CannedInterpreter(Err(()))));
        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert_eq!(response.tafsir, None);
        assert_eq!(response.tafsir_source, None);
        assert_eq!(response.warnings.len(), 1);
    }

    #[test]
    fn unresolved_surah_is_an_error() {
        let (_dir, service) = service(None);
        assert!(matches!(
            service.lookup("سورة غير موجودة", 1, &LookupOptions::default()),
            Err(LookupError::SurahNotFound(_))
        ));
    }

    #[test]
    fn translation_is_optional_and_best_effort() {
        let (_dir, service) = service(Some(r#"{"1": "tafsir text"}"#));
        let service = service.with_translator(Box::new(UpcasingTranslator));
        let options = LookupOptions {
            translate_to: Some("en".to_string()),
            ..LookupOptions::default()
        };
        let response = service.lookup("1", 1, &options).unwrap();
        assert_eq!(response.translated.as_deref(), Some("TAFSIR TEXT"));

        // Without a translate target, no translation happens.
        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert_eq!(response.translated, None);
    }

    #[test]
    fn favorite_flag_tracks_the_store() {
        let (_dir, service) = service(Some(r#"{"1": "تفسير آية البسملة"}"#));
        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert!(!response.is_favorite);

        let result = SearchResult {
            surah_id: response.surah_id,
            surah_name: response.surah_name.clone(),
            ayah_number: response.ayah_number,
            verse_text: response.verse_text.clone(),
            tafsir_text: response.tafsir.clone().unwrap(),
            fingerprint: response.fingerprint.clone().unwrap(),
        };
        service
            .favorites()
            .add(crate::favorites::FavoriteRecord::from_result(
                &result, "arabic", "maissar",
            ))
            .unwrap();

        let response = service.lookup("1", 1, &LookupOptions::default()).unwrap();
        assert!(response.is_favorite);
    }
}
