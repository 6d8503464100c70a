use async_trait::async_trait;

use crate::errors::EngineError;

/// Seam to the external pre-trained transliteration engine.
///
/// An implementation is constructed once at startup and shared by handle
/// across requests; it holds no per-request state. Word-level calls are
/// independent, so callers may issue them concurrently.
#[async_trait]
pub trait XlitEngine: Send + Sync {
    /// Implementation name, for logs.
    fn name(&self) -> &str;

    /// Target language code candidates are produced in.
    fn lang(&self) -> &str;

    /// Ranked candidate spellings for a single romanized word, best first.
    /// May legitimately return an empty list.
    async fn translit_word(&self, word: &str, topk: u32) -> Result<Vec<String>, EngineError>;
}
