use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use xlit_core::{EngineError, XlitEngine};

/// One scripted word reply, optionally delayed.
#[derive(Clone)]
struct Script {
    delay: Option<Duration>,
    reply: Result<Vec<String>, EngineError>,
}

/// Scripted engine for deterministic tests without a running sidecar.
///
/// Unscripted words yield an empty candidate list, which exercises the
/// original-word fallback path.
pub struct MockEngine {
    lang: String,
    scripts: HashMap<String, Script>,
    call_count: AtomicUsize,
}

impl MockEngine {
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            scripts: HashMap::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Script ranked candidates for a word.
    pub fn with_word(mut self, word: &str, candidates: &[&str]) -> Self {
        self.scripts.insert(
            word.to_string(),
            Script {
                delay: None,
                reply: Ok(candidates.iter().map(|c| c.to_string()).collect()),
            },
        );
        self
    }

    /// Script an error for a word.
    pub fn with_error(mut self, word: &str, error: EngineError) -> Self {
        self.scripts.insert(
            word.to_string(),
            Script {
                delay: None,
                reply: Err(error),
            },
        );
        self
    }

    /// Script candidates that only arrive after `delay`.
    pub fn with_word_after(mut self, word: &str, delay: Duration, candidates: &[&str]) -> Self {
        self.scripts.insert(
            word.to_string(),
            Script {
                delay: Some(delay),
                reply: Ok(candidates.iter().map(|c| c.to_string()).collect()),
            },
        );
        self
    }

    /// Number of word-level calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl XlitEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn lang(&self) -> &str {
        &self.lang
    }

    async fn translit_word(&self, word: &str, _topk: u32) -> Result<Vec<String>, EngineError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        match self.scripts.get(word) {
            Some(script) => {
                if let Some(delay) = script.delay {
                    tokio::time::sleep(delay).await;
                }
                script.reply.clone()
            }
            None => Ok(Vec::new()),
        }
    }
}
