use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use xlit_core::BoardConfig;

use crate::page;
use crate::store;

/// Shared state for the board page. Only configuration: the database
/// connection is opened per request, never held here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BoardConfig>,
}

/// Build the Axum router for the board page.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// `GET /` — open a scoped connection, read the newest message, render it.
async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match store::latest_message(&state.config.database_url, state.config.db_timeout).await {
        Ok(message) => Ok(Html(page::render_message(
            message.as_ref().map(|m| m.content.as_str()),
        ))),
        Err(e) => {
            tracing::error!(error = %e, "failed to load latest message");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>".to_string()),
            ))
        }
    }
}

/// Create and start the board server. Returns a handle that keeps it alive.
pub async fn start(config: BoardConfig) -> Result<ServerHandle, std::io::Error> {
    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "board server started");

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
