//! Offline repair of malformed corpus files.
//!
//! Converted tafsir files occasionally arrive with stray control
//! characters, curly quotes, or trailing commas. This module recovers
//! them as a separate, explicit tool — the read path in [`crate::corpus`]
//! never repairs anything.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::corpus::AyahMap;

lazy_static! {
    /// Invisible control characters, keeping tab/newline/carriage return.
    static ref CONTROL_CHARS: Regex =
        Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap();
    /// Trailing comma before a closing brace or bracket.
    static ref TRAILING_COMMA: Regex = Regex::new(r",\s*([}\]])").unwrap();
    /// Last-resort salvage of `"digits": "text"` pairs.
    static ref AYAH_PAIR: Regex =
        Regex::new(r#""(\d+)"\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap();
}

/// How a file was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Parsed as-is; nothing to fix.
    Clean,
    /// Parsed after character sanitization.
    Sanitized,
    /// Rebuilt from individually salvaged ayah pairs.
    Salvaged,
}

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not recover any ayah entries")]
    Unrecoverable,
}

/// Strip invisible control characters, straighten curly quotes, and drop
/// trailing commas. Purely textual; does not validate JSON.
pub fn sanitize_json_text(text: &str) -> String {
    let text = CONTROL_CHARS.replace_all(text, "");
    let text = text
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'");
    TRAILING_COMMA.replace_all(&text, "$1").into_owned()
}

/// Recover an ayah map from possibly-malformed corpus text.
///
/// Tries, in order: parse as-is, parse after [`sanitize_json_text`],
/// salvage individual `"digits": "text"` pairs.
pub fn repair_corpus_text(text: &str) -> Result<(AyahMap, RepairOutcome), RepairError> {
    if let Some(map) = parse_ayah_map(text) {
        return Ok((map, RepairOutcome::Clean));
    }

    let sanitized = sanitize_json_text(text);
    if let Some(map) = parse_ayah_map(&sanitized) {
        return Ok((map, RepairOutcome::Sanitized));
    }

    let mut salvaged = AyahMap::new();
    for captures in AYAH_PAIR.captures_iter(&sanitized) {
        if let Ok(ayah) = captures[1].parse::<u32>() {
            if ayah > 0 {
                salvaged.insert(ayah, captures[2].to_string());
            }
        }
    }
    if salvaged.is_empty() {
        return Err(RepairError::Unrecoverable);
    }
    Ok((salvaged, RepairOutcome::Salvaged))
}

/// Repair a corpus file in place, backing the original up to
/// `<path>.bak` first (an existing backup is never overwritten).
pub fn repair_corpus_file<P: AsRef<Path>>(path: P) -> Result<RepairOutcome, RepairError> {
    let path = path.as_ref();
    let original = fs::read_to_string(path).map_err(|source| RepairError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (map, outcome) = repair_corpus_text(&original)?;
    if outcome == RepairOutcome::Clean {
        return Ok(outcome);
    }

    let backup = path.with_extension("json.bak");
    if !backup.exists() {
        fs::write(&backup, &original).map_err(|source| RepairError::Io {
            path: backup.clone(),
            source,
        })?;
        tracing::info!("backed up {} to {}", path.display(), backup.display());
    }

    let keyed: std::collections::BTreeMap<String, &String> =
        map.iter().map(|(ayah, text)| (ayah.to_string(), text)).collect();
    let rendered = serde_json::to_string_pretty(&keyed).map_err(|err| RepairError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(err),
    })?;
    fs::write(path, rendered).map_err(|source| RepairError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("repaired {} ({outcome:?})", path.display());
    Ok(outcome)
}

fn parse_ayah_map(text: &str) -> Option<AyahMap> {
    let parsed: std::collections::HashMap<String, String> = serde_json::from_str(text).ok()?;
    let map: AyahMap = parsed
        .into_iter()
        .filter_map(|(key, value)| {
            let ayah = key.trim().parse::<u32>().ok()?;
            (ayah > 0).then_some((ayah, value))
        })
        .collect();
    (!map.is_empty()).then_some(map)
}
