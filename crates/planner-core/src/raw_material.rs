//! 原物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 原物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// 原物料ID
    pub id: i64,

    /// 名稱
    pub name: String,

    /// 現有庫存
    pub stock_quantity: Decimal,
}

impl RawMaterial {
    /// 創建新的原物料
    pub fn new(id: i64, name: impl Into<String>, stock_quantity: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            stock_quantity,
        }
    }

    /// 檢查是否還有庫存
    pub fn has_stock(&self) -> bool {
        self.stock_quantity > Decimal::ZERO
    }

    /// 名稱是否包含關鍵字（不分大小寫）
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
