//! # Production Suggestion Engine
//!
//! 生產建議計算引擎：在有限的原物料庫存下，依產品價值由高到低貪婪分配產量

pub mod allocator;
pub mod assembler;
pub mod feasibility;
pub mod planner;
pub mod stock;

// Re-export 主要類型
pub use allocator::AllocationEngine;
pub use assembler::SuggestionAssembler;
pub use feasibility::FeasibilityCalculator;
pub use planner::ProductionPlanner;
pub use stock::StockSnapshot;

use chrono::{DateTime, Utc};
use planner_core::ProductionSuggestion;
use uuid::Uuid;

/// 單次計算結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 計算ID（用於日誌關聯）
    pub run_id: Uuid,

    /// 生產建議
    pub suggestion: ProductionSuggestion,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 實際執行的輪數（含最後一輪無產出的確認輪）
    pub passes: u32,

    /// 計算時間
    pub calculated_at: DateTime<Utc>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            suggestion: ProductionSuggestion::empty(),
            warnings: Vec::new(),
            passes: 0,
            calculated_at: Utc::now(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 取出生產建議
    pub fn into_suggestion(self) -> ProductionSuggestion {
        self.suggestion
    }
}

/// 計算警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWarning {
    pub product_id: i64,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(product_id: i64, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: i64, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Info)
    }

    pub fn warning(product_id: i64, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
