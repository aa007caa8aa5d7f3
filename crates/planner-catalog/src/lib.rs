//! # Planner Catalog
//!
//! 產品目錄（產品、原物料、物料清單關聯）的記憶體儲存與驗證

pub mod input;
pub mod seed;
pub mod store;
pub mod validation;

// Re-export 主要類型
pub use input::{BomLineInput, ProductInput, RawMaterialInput};
pub use seed::SeedDocument;
pub use store::InMemoryCatalog;
pub use validation::FieldErrors;

/// 目錄錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("驗證失敗")]
    Validation(FieldErrors),

    #[error("{0}")]
    Business(String),

    #[error("目錄無法使用: {0}")]
    Unavailable(String),

    #[error("種子資料錯誤: {0}")]
    Seed(String),
}

impl CatalogError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn business(msg: impl Into<String>) -> Self {
        Self::Business(msg.into())
    }

    /// 單一欄位的驗證錯誤
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), msg.into());
        Self::Validation(errors)
    }
}

impl From<CatalogError> for planner_core::PlanError {
    fn from(err: CatalogError) -> Self {
        planner_core::PlanError::CatalogUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
