use std::sync::Arc;

use xlit_core::XlitConfig;
use xlit_engine::RemoteEngine;
use xlit_server::ServerConfig;
use xlit_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::default());

    let config = XlitConfig::from_env();
    tracing::info!(
        lang = %config.lang,
        beam_width = config.beam_width,
        topk_default = config.topk_default,
        auth = config.api_key.is_some(),
        "starting transliteration server"
    );

    // The engine is the one process-wide collaborator: built once, shared by
    // handle into every request.
    let engine = Arc::new(RemoteEngine::new(&config));

    let server_config = ServerConfig {
        port: config.port,
        ..Default::default()
    };
    let handle = xlit_server::start(server_config, engine, config).await?;

    tracing::info!(port = handle.port, "transliteration server ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
