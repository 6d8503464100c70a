use std::time::Duration;

/// Errors from a single word-level engine call.
///
/// The batch layer downgrades all of these to the original-word fallback, so
/// none of them ever aborts a request. They exist so the failure is logged
/// with its real cause instead of vanishing into an empty candidate list.
#[derive(Clone, Debug, thiserror::Error)]
pub enum EngineError {
    #[error("network error: {0}")]
    Network(String),

    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode engine reply: {0}")]
    Decode(String),

    #[error("engine call timed out after {0:?}")]
    Timeout(Duration),

    /// The engine answered a map keyed by language, but the configured
    /// target language was not among the keys. Almost always a
    /// misconfiguration on one side or the other.
    #[error("engine reply has no entry for language {lang:?} (available: {available:?})")]
    MissingLang { lang: String, available: Vec<String> },
}

impl EngineError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::Status { .. } => "engine_status",
            Self::Decode(_) => "decode_error",
            Self::Timeout(_) => "timeout",
            Self::MissingLang { .. } => "missing_lang",
        }
    }
}
