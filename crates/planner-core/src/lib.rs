//! # Planner Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod product;
pub mod raw_material;
pub mod suggestion;

// Re-export 主要類型
pub use catalog::{sort_by_value_desc, CatalogProvider, StaticCatalog};
pub use config::PlannerConfig;
pub use product::{BomLine, Product};
pub use raw_material::RawMaterial;
pub use suggestion::{ProductionItem, ProductionSuggestion};

/// 生產建議計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("超過最大計算輪數: {max_passes}")]
    PassLimitExceeded { max_passes: u32 },

    #[error("計算已取消（已完成 {passes} 輪）")]
    Cancelled { passes: u32 },

    #[error("數值溢出: {0}")]
    ArithmeticOverflow(String),

    #[error("無法讀取產品目錄: {0}")]
    CatalogUnavailable(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
