//! Word-level batch transliteration with per-word fallback.

use futures::future::join_all;
use tracing::warn;

use xlit_core::{TransliterateResponse, WordResult, XlitEngine};

/// Transliterate whitespace-delimited text word by word.
///
/// Engine failures are swallowed at word granularity: a failed word falls
/// back to its original spelling with an empty candidate list, so the output
/// always has the same word count as the input and a single bad word never
/// aborts the batch. Returns `None` when the input trims to empty; the
/// caller decides how to reject that.
///
/// Word calls are independent, so they are issued concurrently and the
/// results reassembled in input order.
pub async fn transliterate_text(
    engine: &dyn XlitEngine,
    input: &str,
    topk: u32,
) -> Option<TransliterateResponse> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    let parts: Vec<WordResult> = join_all(
        text.split_whitespace()
            .map(|word| translit_one(engine, word, topk)),
    )
    .await;

    let output = parts
        .iter()
        .map(|p| p.top1.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(TransliterateResponse {
        input: text.to_string(),
        output,
        parts,
    })
}

async fn translit_one(engine: &dyn XlitEngine, word: &str, topk: u32) -> WordResult {
    match engine.translit_word(word, topk).await {
        Ok(candidates) => {
            let top1 = candidates
                .first()
                .cloned()
                .unwrap_or_else(|| word.to_string());
            WordResult {
                input: word.to_string(),
                top1,
                candidates,
            }
        }
        Err(e) => {
            warn!(
                word,
                error_kind = e.error_kind(),
                error = %e,
                "engine call failed, falling back to input word"
            );
            WordResult {
                input: word.to_string(),
                top1: word.to_string(),
                candidates: Vec::new(),
            }
        }
    }
}
