use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use xlit_core::{XlitConfig, XlitEngine};

use crate::handlers;

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
    /// Bound on a whole request, engine calls included.
    pub handler_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            handler_timeout_secs: 30,
        }
    }
}

/// Shared application state passed to Axum handlers. The engine is the one
/// process-wide collaborator; it is constructed once and shared by handle.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn XlitEngine>,
    pub config: Arc<XlitConfig>,
}

/// Build the Axum router with all routes. CORS is deliberately wide open:
/// any caller may invoke the API.
pub fn build_router(state: AppState, handler_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/v1/health", get(handlers::health))
        .route("/api/transliterate", post(handlers::transliterate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(handler_timeout))
        .layer(CorsLayer::permissive())
}

/// Create and start the server. Returns a handle that keeps it alive.
pub async fn start(
    config: ServerConfig,
    engine: Arc<dyn XlitEngine>,
    xlit_config: XlitConfig,
) -> Result<ServerHandle, std::io::Error> {
    let state = AppState {
        engine,
        config: Arc::new(xlit_config),
    };

    let router = build_router(state, Duration::from_secs(config.handler_timeout_secs));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "transliteration server started");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server_handle,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;
    use xlit_core::EngineError;
    use xlit_engine::MockEngine;

    fn demo_engine() -> MockEngine {
        MockEngine::new("hi")
            .with_word("namaste", &["नमस्ते", "नमसते"])
            .with_word("duniya", &["दुनिया"])
    }

    async fn start_with(engine: MockEngine, api_key: Option<&str>) -> ServerHandle {
        let config = XlitConfig {
            api_key: api_key.map(|k| SecretString::from(k.to_string())),
            ..Default::default()
        };
        let server_config = ServerConfig {
            port: 0, // Random port
            ..Default::default()
        };
        start(server_config, Arc::new(engine), config).await.unwrap()
    }

    #[tokio::test]
    async fn server_starts_and_serves_health() {
        let handle = start_with(demo_engine(), None).await;
        assert!(handle.port > 0);

        let url = format!("http://127.0.0.1:{}/v1/health", handle.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["lang"], "hi");
    }

    #[tokio::test]
    async fn root_reports_running() {
        let handle = start_with(demo_engine(), None).await;

        let url = format!("http://127.0.0.1:{}/", handle.port);
        let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(body["status"], "running");
        assert_eq!(body["lang"], "hi");
    }

    #[tokio::test]
    async fn transliterate_end_to_end() {
        let handle = start_with(demo_engine(), None).await;
        let url = format!("http://127.0.0.1:{}/api/transliterate", handle.port);

        let resp = reqwest::Client::new()
            .post(&url)
            .json(&json!({ "input": "namaste duniya", "topk": 3 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["input"], "namaste duniya");
        assert_eq!(body["parts"].as_array().unwrap().len(), 2);
        assert_eq!(body["parts"][0]["input"], "namaste");
        assert_eq!(body["parts"][0]["top1"], "नमस्ते");
        assert_eq!(body["parts"][1]["top1"], "दुनिया");
        assert_eq!(body["output"], "नमस्ते दुनिया");
    }

    #[tokio::test]
    async fn empty_input_is_a_400() {
        let handle = start_with(demo_engine(), None).await;
        let url = format!("http://127.0.0.1:{}/api/transliterate", handle.port);

        for input in ["", "   "] {
            let resp = reqwest::Client::new()
                .post(&url)
                .json(&json!({ "input": input }))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 400);

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["error"], "input required");
        }
    }

    #[tokio::test]
    async fn engine_failure_still_answers_with_fallback() {
        let engine = MockEngine::new("hi")
            .with_word("namaste", &["नमस्ते"])
            .with_error("duniya", EngineError::Network("down".into()));
        let handle = start_with(engine, None).await;
        let url = format!("http://127.0.0.1:{}/api/transliterate", handle.port);

        let body: serde_json::Value = reqwest::Client::new()
            .post(&url)
            .json(&json!({ "input": "namaste duniya" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["output"], "नमस्ते duniya");
        assert_eq!(body["parts"][1]["top1"], "duniya");
        assert_eq!(body["parts"][1]["candidates"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn bearer_guard_gates_the_endpoint() {
        let handle = start_with(demo_engine(), Some("secret")).await;
        let url = format!("http://127.0.0.1:{}/api/transliterate", handle.port);
        let client = reqwest::Client::new();
        let body = json!({ "input": "namaste" });

        // Missing header
        let resp = client.post(&url).json(&body).send().await.unwrap();
        assert_eq!(resp.status(), 401);

        // Wrong token
        let resp = client
            .post(&url)
            .bearer_auth("wrong")
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        // Matching token
        let resp = client
            .post(&url)
            .bearer_auth("secret")
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        // Health stays open regardless
        let health = format!("http://127.0.0.1:{}/v1/health", handle.port);
        assert_eq!(reqwest::get(&health).await.unwrap().status(), 200);
    }

    #[tokio::test]
    async fn repeated_identical_requests_are_idempotent() {
        let handle = start_with(demo_engine(), None).await;
        let url = format!("http://127.0.0.1:{}/api/transliterate", handle.port);
        let client = reqwest::Client::new();
        let req = json!({ "input": "namaste duniya" });

        let first: serde_json::Value = client
            .post(&url).json(&req).send().await.unwrap().json().await.unwrap();
        let second: serde_json::Value = client
            .post(&url).json(&req).send().await.unwrap().json().await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn build_router_creates_routes() {
        let state = AppState {
            engine: Arc::new(MockEngine::new("hi")),
            config: Arc::new(XlitConfig::default()),
        };
        let _router = build_router(state, Duration::from_secs(30));
        // If this doesn't panic, the router was built successfully
    }
}
