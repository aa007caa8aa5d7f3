//! 路由與處理器

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use planner_calc::ProductionPlanner;
use planner_catalog::InMemoryCatalog;
use planner_core::{PlannerConfig, ProductionSuggestion};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::dto::{
    BomLineRequest, HealthResponse, ProductRequest, ProductResponse, RawMaterialRequest,
    RawMaterialResponse, RequiredQuantityRequest, SearchQuery,
};
use crate::error::{ApiError, ApiResult};

/// 路由共享狀態
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<InMemoryCatalog>,
    pub planner: Arc<ProductionPlanner<Arc<InMemoryCatalog>>>,
    pub calculation_timeout: Duration,
}

impl AppState {
    pub fn new(catalog: Arc<InMemoryCatalog>, config: PlannerConfig, timeout: Duration) -> Self {
        let planner = ProductionPlanner::new(catalog.clone(), config);
        Self {
            catalog,
            planner: Arc::new(planner),
            calculation_timeout: timeout,
        }
    }
}

/// 建立全部 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/production/suggestion", get(production_suggestion))
        .route(
            "/api/raw-materials",
            get(list_raw_materials).post(create_raw_material),
        )
        .route("/api/raw-materials/search", get(search_raw_materials))
        .route(
            "/api/raw-materials/{id}",
            get(get_raw_material)
                .put(update_raw_material)
                .delete(delete_raw_material),
        )
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/api/products/{id}/raw-materials",
            post(add_product_raw_material),
        )
        .route(
            "/api/products/{id}/raw-materials/{raw_material_id}",
            put(update_product_raw_material).delete(remove_product_raw_material),
        )
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// ---- 生產建議 ----

/// 在阻塞執行緒池上計算，逾時則取消計算並回應 503
async fn production_suggestion(
    State(state): State<AppState>,
) -> ApiResult<Json<ProductionSuggestion>> {
    let token = CancellationToken::new();
    let planner = state.planner.clone();
    let run_token = token.clone();
    let task = tokio::task::spawn_blocking(move || planner.suggest_cancellable(run_token));

    match tokio::time::timeout(state.calculation_timeout, task).await {
        Ok(joined) => {
            let result = joined.map_err(|e| ApiError::Internal(e.to_string()))??;
            info!(
                run_id = %result.run_id,
                passes = result.passes,
                items = result.suggestion.items.len(),
                warnings = result.warnings.len(),
                "生產建議計算完成"
            );
            Ok(Json(result.into_suggestion()))
        }
        Err(_) => {
            token.cancel();
            let timeout_ms = state.calculation_timeout.as_millis() as u64;
            warn!(timeout_ms, "生產建議計算逾時，已取消");
            Err(ApiError::Timeout(timeout_ms))
        }
    }
}

// ---- 原物料 ----

async fn list_raw_materials(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RawMaterialResponse>>> {
    let materials = state.catalog.list_raw_materials()?;
    Ok(Json(materials.into_iter().map(Into::into).collect()))
}

async fn search_raw_materials(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<RawMaterialResponse>>> {
    let materials = state.catalog.search_raw_materials(&query.name)?;
    Ok(Json(materials.into_iter().map(Into::into).collect()))
}

async fn get_raw_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RawMaterialResponse>> {
    Ok(Json(state.catalog.raw_material(id)?.into()))
}

async fn create_raw_material(
    State(state): State<AppState>,
    payload: Result<Json<RawMaterialRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let material = state.catalog.create_raw_material(request.into_input()?)?;
    info!(id = material.id, name = %material.name, "原物料已新增");

    let location = format!("/api/raw-materials/{}", material.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(RawMaterialResponse::from(material)),
    ))
}

async fn update_raw_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<RawMaterialRequest>, JsonRejection>,
) -> ApiResult<Json<RawMaterialResponse>> {
    let Json(request) = payload?;
    let material = state.catalog.update_raw_material(id, request.into_input()?)?;
    Ok(Json(material.into()))
}

async fn delete_raw_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_raw_material(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- 產品 ----

async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductResponse>>> {
    let products = state.catalog.list_products()?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProductResponse>> {
    Ok(Json(state.catalog.product(id)?.into()))
}

async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let product = state.catalog.create_product(request.into_input()?)?;
    info!(id = product.id, name = %product.name, "產品已新增");

    let location = format!("/api/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductResponse::from(product)),
    ))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Json(request) = payload?;
    let product = state.catalog.update_product(id, request.into_input()?)?;
    Ok(Json(product.into()))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_product(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_product_raw_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<BomLineRequest>, JsonRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Json(request) = payload?;
    let product = state.catalog.add_bom_line(id, request.into_input()?)?;
    Ok(Json(product.into()))
}

async fn update_product_raw_material(
    State(state): State<AppState>,
    Path((id, raw_material_id)): Path<(i64, i64)>,
    payload: Result<Json<RequiredQuantityRequest>, JsonRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Json(request) = payload?;
    let product = state
        .catalog
        .update_bom_line(id, raw_material_id, request.into_quantity()?)?;
    Ok(Json(product.into()))
}

async fn remove_product_raw_material(
    State(state): State<AppState>,
    Path((id, raw_material_id)): Path<(i64, i64)>,
) -> ApiResult<Json<ProductResponse>> {
    let product = state.catalog.remove_bom_line(id, raw_material_id)?;
    Ok(Json(product.into()))
}
