//! # Planner Server
//!
//! 生產建議與產品目錄的 HTTP API

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use routes::AppState;

use axum::Router;
use planner_catalog::InMemoryCatalog;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 組裝完整應用（路由 + 請求追蹤 + CORS）
pub fn app(state: AppState) -> Router {
    routes::api_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 依配置建立共享狀態；有種子檔時先載入目錄
pub fn build_state(config: &AppConfig) -> planner_catalog::Result<AppState> {
    let catalog = match &config.catalog.seed_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "載入種子資料");
            InMemoryCatalog::from_seed_file(path)?
        }
        None => InMemoryCatalog::new(),
    };

    Ok(AppState::new(
        Arc::new(catalog),
        config.planner.engine.clone(),
        config.planner.calculation_timeout(),
    ))
}
