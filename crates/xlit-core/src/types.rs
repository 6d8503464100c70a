use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Body of `POST /api/transliterate`.
#[derive(Clone, Debug, Deserialize)]
pub struct TransliterateRequest {
    pub input: String,
    /// Candidates requested per word. Defaults from config when omitted.
    #[serde(default)]
    pub topk: Option<u32>,
}

/// Outcome for a single word.
///
/// `top1` is always present: the engine's best-ranked candidate, or the
/// original word when the engine produced nothing or failed. This is what
/// guarantees the joined output has the same word count as the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub input: String,
    pub top1: String,
    pub candidates: Vec<String>,
}

/// Full response for a transliteration request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterateResponse {
    /// The trimmed input text.
    pub input: String,
    /// Space-joined `top1` values, in original word order.
    pub output: String,
    pub parts: Vec<WordResult>,
}

/// Shape of a single-word reply from the engine.
///
/// Some engine builds answer a map keyed by target language, others a plain
/// ranked list. Both decode here; `for_lang` collapses them.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum CandidateSet {
    ByLang(HashMap<String, Vec<String>>),
    Ranked(Vec<String>),
}

impl CandidateSet {
    /// Resolve to a ranked candidate list for `lang`, best first.
    ///
    /// A map reply missing the requested key is an error rather than a silent
    /// empty list, so callers can log the language mismatch.
    pub fn for_lang(self, lang: &str) -> Result<Vec<String>, EngineError> {
        match self {
            Self::Ranked(list) => Ok(list),
            Self::ByLang(mut map) => match map.remove(lang) {
                Some(list) => Ok(list),
                None => {
                    let mut available: Vec<String> = map.into_keys().collect();
                    available.sort();
                    Err(EngineError::MissingLang {
                        lang: lang.to_string(),
                        available,
                    })
                }
            },
        }
    }
}

/// Row from the external message table. This service only ever reads the
/// newest row by `created_on`; the table is owned elsewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub created_on: DateTime<Utc>,
}
