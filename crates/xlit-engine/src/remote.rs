use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use xlit_core::{CandidateSet, EngineError, XlitConfig, XlitEngine};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the sidecar process serving the pre-trained transliteration
/// model. One word per call; the sidecar owns beam search and ranking.
pub struct RemoteEngine {
    client: Client,
    url: String,
    lang: String,
    beam_width: u32,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct WordQuery<'a> {
    word: &'a str,
    lang: &'a str,
    topk: u32,
    beam_width: u32,
}

impl RemoteEngine {
    pub fn new(config: &XlitConfig) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(config.request_timeout)
                .build()
                .expect("failed to build HTTP client"),
            url: format!(
                "{}/translit_word",
                config.engine_url.trim_end_matches('/')
            ),
            lang: config.lang.clone(),
            beam_width: config.beam_width,
            request_timeout: config.request_timeout,
        }
    }

    /// Endpoint the engine is reached at.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl XlitEngine for RemoteEngine {
    fn name(&self) -> &str {
        "remote"
    }

    fn lang(&self) -> &str {
        &self.lang
    }

    async fn translit_word(&self, word: &str, topk: u32) -> Result<Vec<String>, EngineError> {
        let query = WordQuery {
            word,
            lang: &self.lang,
            topk,
            beam_width: self.beam_width,
        };

        let resp = self
            .client
            .post(&self.url)
            .json(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout(self.request_timeout)
                } else {
                    EngineError::Network(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }

        let set: CandidateSet = resp
            .json()
            .await
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        set.for_lang(&self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_properties_from_config() {
        let config = XlitConfig {
            lang: "ta".to_string(),
            engine_url: "http://engine:9000/".to_string(),
            ..Default::default()
        };
        let engine = RemoteEngine::new(&config);
        assert_eq!(engine.name(), "remote");
        assert_eq!(engine.lang(), "ta");
        assert_eq!(engine.url(), "http://engine:9000/translit_word");
    }

    #[tokio::test]
    async fn unreachable_engine_is_a_network_error() {
        // Reserved TEST-NET address; nothing listens there.
        let config = XlitConfig {
            engine_url: "http://192.0.2.1:1".to_string(),
            request_timeout: Duration::from_millis(300),
            ..Default::default()
        };
        let engine = RemoteEngine::new(&config);
        let err = engine.translit_word("namaste", 3).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Network(_) | EngineError::Timeout(_)
        ));
    }

    #[test]
    fn word_query_wire_shape() {
        let query = WordQuery {
            word: "namaste",
            lang: "hi",
            topk: 3,
            beam_width: 10,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["word"], "namaste");
        assert_eq!(json["lang"], "hi");
        assert_eq!(json["topk"], 3);
        assert_eq!(json["beam_width"], 10);
    }
}
