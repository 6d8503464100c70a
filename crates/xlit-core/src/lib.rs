pub mod config;
pub mod engine;
pub mod errors;
pub mod types;

pub use config::{BoardConfig, ConfigError, XlitConfig};
pub use engine::XlitEngine;
pub use errors::EngineError;
pub use types::{CandidateSet, Message, TransliterateRequest, TransliterateResponse, WordResult};
