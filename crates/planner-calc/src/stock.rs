//! 庫存快照

use planner_core::Product;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 單次計算專用的原物料庫存副本
///
/// 每個原物料只初始化一次（以優先順序中第一次出現的物料清單行為準），
/// 之後只會被扣減。
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    levels: HashMap<i64, Decimal>,
}

impl StockSnapshot {
    /// 創建空快照
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
        }
    }

    /// 依優先順序掃描產品，初始化所有被引用原物料的庫存
    pub fn initialize(products: &[Product]) -> Self {
        let mut snapshot = Self::new();
        for product in products {
            for line in &product.bill_of_materials {
                snapshot
                    .levels
                    .entry(line.raw_material_id)
                    .or_insert(line.stock_quantity);
            }
        }

        tracing::debug!("庫存快照初始化完成，原物料數量: {}", snapshot.levels.len());
        snapshot
    }

    /// 扣減庫存
    ///
    /// 扣減量必須來自已驗證可行的產量，結果不會低於 0。
    pub fn deduct(&mut self, raw_material_id: i64, amount: Decimal) {
        let level = self.levels.entry(raw_material_id).or_insert(Decimal::ZERO);
        *level -= amount;
        debug_assert!(
            *level >= Decimal::ZERO,
            "原物料 {} 庫存扣減後為負: {}",
            raw_material_id,
            level
        );
    }

    /// 可用庫存（未引用的原物料視為 0）
    pub fn available(&self, raw_material_id: i64) -> Decimal {
        self.levels
            .get(&raw_material_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 所有原物料的剩餘量
    pub fn remaining(&self) -> &HashMap<i64, Decimal> {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
