//! Seams for the external collaborators the core calls but does not
//! implement: a generative interpretation source, a text translator, and
//! a speech synthesizer.
//!
//! All three are best-effort. A failure degrades the response (the
//! translation or audio is omitted, or the lookup reports no tafsir) and
//! is surfaced as a soft warning; it never aborts a lookup.

use thiserror::Error;

use crate::surah::SurahId;

/// Failure of an external service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("service call failed: {0}")]
    Failed(String),
}

/// What the interpretation source is asked to interpret.
#[derive(Debug, Clone)]
pub struct InterpretRequest<'a> {
    pub surah_id: SurahId,
    pub surah_name: &'a str,
    pub ayah_number: u32,
    /// Verse text when locally available; the source may have to fetch
    /// or reconstruct it otherwise.
    pub verse_text: Option<&'a str>,
    /// Display name of the requested interpretation style.
    pub interpreter_name: &'a str,
}

/// Generative interpretation source, used when local tafsir is absent.
///
/// Must return plain interpretation text or signal failure.
pub trait Interpreter {
    fn name(&self) -> &str;
    fn interpret(&self, request: &InterpretRequest<'_>) -> Result<String, ServiceError>;
}

/// Text translation service.
pub trait Translator {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String, ServiceError>;
}

/// Text-to-speech service returning an audio byte blob.
pub trait SpeechSynthesizer {
    fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, ServiceError>;
}
