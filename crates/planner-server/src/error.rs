//! HTTP 錯誤映射

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planner_catalog::{CatalogError, FieldErrors};
use planner_core::PlanError;
use serde::Serialize;

/// API 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("計算逾時（{0} 毫秒）")]
    Timeout(u64),

    #[error("請求格式錯誤: {0}")]
    BadRequest(String),

    #[error("內部錯誤: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 一般錯誤回應
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
}

/// 欄位驗證錯誤回應
#[derive(Debug, Serialize)]
struct ValidationBody<'a> {
    message: &'static str,
    errors: &'a FieldErrors,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Catalog(CatalogError::Validation(_))
            | ApiError::Catalog(CatalogError::Business(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Plan(PlanError::PassLimitExceeded { .. })
            | ApiError::Plan(PlanError::Cancelled { .. })
            | ApiError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Plan(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Catalog(CatalogError::Validation(errors)) = &self {
            let body = ValidationBody {
                message: "Validation failed",
                errors,
            };
            return (status, Json(body)).into_response();
        }

        if status.is_server_error() {
            tracing::error!(error = %self, "請求處理失敗");
        } else {
            tracing::debug!(error = %self, "請求被拒絕");
        }

        let body = ErrorBody {
            message: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
