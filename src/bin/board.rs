use xlit_core::BoardConfig;
use xlit_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::default());

    let config = BoardConfig::from_env()?;
    let handle = xlit_board::start(config).await?;

    tracing::info!(port = handle.port, "board server ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
