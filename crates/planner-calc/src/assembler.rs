//! 生產建議彙整

use planner_core::{Product, ProductionItem, ProductionSuggestion};
use std::collections::HashMap;

/// 將每輪的產量合併成依首次生產順序排列的建議
#[derive(Debug, Default)]
pub struct SuggestionAssembler {
    items: Vec<ProductionItem>,
    positions: HashMap<i64, usize>,
}

impl SuggestionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄一次產出：首次出現時新增項目，否則累加數量並重算小計
    pub fn record(&mut self, product: &Product, units: u128) -> planner_core::Result<()> {
        match self.positions.get(&product.id) {
            Some(&index) => self.items[index].add_units(units),
            None => {
                let item = ProductionItem::for_product(product, units)?;
                self.positions.insert(product.id, self.items.len());
                self.items.push(item);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 完成彙整並計算總價值
    pub fn finish(self) -> planner_core::Result<ProductionSuggestion> {
        ProductionSuggestion::from_items(self.items)
    }
}
