//! 生產建議服務

use anyhow::Context;
use planner_server::{app, build_state, telemetry, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_dir = std::env::var("PLANNER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir).context("無法載入配置")?;

    telemetry::init(&config.telemetry);

    let state = build_state(&config).context("無法建立產品目錄")?;
    let addr = config.socket_addr()?;

    info!(
        %addr,
        max_passes = config.planner.engine.max_passes,
        timeout_ms = config.planner.calculation_timeout_ms,
        "生產建議服務啟動"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("無法綁定 {}", addr))?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
