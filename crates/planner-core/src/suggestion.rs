//! 生產建議模型（計算結果）

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlanError, Product};

/// 生產建議項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionItem {
    /// 產品ID
    pub product_id: i64,

    /// 產品名稱
    pub product_name: String,

    /// 計算當下的產品單位價值
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub product_value: Decimal,

    /// 累計生產數量
    pub quantity: u128,

    /// 小計 = 單位價值 × 數量
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,
}

impl ProductionItem {
    /// 以產品當下的名稱與價值創建項目
    pub fn for_product(product: &Product, quantity: u128) -> crate::Result<Self> {
        let subtotal = subtotal_of(product.value, quantity)?;
        Ok(Self {
            product_id: product.id,
            product_name: product.name.clone(),
            product_value: product.value,
            quantity,
            subtotal,
        })
    }

    /// 累加生產數量並重新計算小計
    pub fn add_units(&mut self, units: u128) -> crate::Result<()> {
        let quantity = self.quantity.checked_add(units).ok_or_else(|| {
            PlanError::ArithmeticOverflow(format!(
                "產品 {} 數量 {} + {}",
                self.product_id, self.quantity, units
            ))
        })?;
        self.subtotal = subtotal_of(self.product_value, quantity)?;
        self.quantity = quantity;
        Ok(())
    }
}

fn subtotal_of(value: Decimal, quantity: u128) -> crate::Result<Decimal> {
    Decimal::from_u128(quantity)
        .and_then(|quantity| value.checked_mul(quantity))
        .ok_or_else(|| PlanError::ArithmeticOverflow(format!("{} × {}", value, quantity)))
}

/// 生產建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSuggestion {
    /// 依首次生產順序排列的項目
    pub items: Vec<ProductionItem>,

    /// 總價值（所有小計的精確總和）
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_value: Decimal,
}

impl ProductionSuggestion {
    /// 創建空的生產建議
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_value: Decimal::ZERO,
        }
    }

    /// 由項目列表建立並計算總價值
    pub fn from_items(items: Vec<ProductionItem>) -> crate::Result<Self> {
        let total_value = items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.subtotal).ok_or_else(|| {
                PlanError::ArithmeticOverflow(format!("總價值 {} + {}", acc, item.subtotal))
            })
        })?;
        Ok(Self { items, total_value })
    }

    /// 檢查是否沒有任何建議
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 查找特定產品的項目
    pub fn item(&self, product_id: i64) -> Option<&ProductionItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// 所有項目的總生產數量
    pub fn total_quantity(&self) -> u128 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl Default for ProductionSuggestion {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product_a() -> Product {
        Product::new(1, "Product A", Decimal::from_str("100.00").unwrap())
    }

    #[test]
    fn test_item_subtotal() {
        let mut item = ProductionItem::for_product(&product_a(), 3).unwrap();
        assert_eq!(item.subtotal, Decimal::from(300));

        item.add_units(7).unwrap();
        assert_eq!(item.quantity, 10);
        assert_eq!(item.subtotal.to_string(), "1000.00");
    }

    #[test]
    fn test_quantity_beyond_u64() {
        let mut item = ProductionItem::for_product(&product_a(), u64::MAX as u128).unwrap();
        item.add_units(1).unwrap();

        assert_eq!(item.quantity, u64::MAX as u128 + 1);
        assert_eq!(item.subtotal.to_string(), "1844674407370955161600.00");
    }

    #[test]
    fn test_subtotal_overflow() {
        assert!(matches!(
            ProductionItem::for_product(&product_a(), u128::MAX),
            Err(PlanError::ArithmeticOverflow(_))
        ));

        let quantity = 10u128.pow(26);
        let mut item = ProductionItem::for_product(&product_a(), quantity).unwrap();
        assert!(matches!(
            item.add_units(10u128.pow(27)),
            Err(PlanError::ArithmeticOverflow(_))
        ));
        assert_eq!(item.quantity, quantity);
    }

    #[test]
    fn test_suggestion_total() {
        let a = ProductionItem::for_product(&product_a(), 2).unwrap();
        let b = ProductionItem::for_product(
            &Product::new(2, "Product B", Decimal::from_str("0.35").unwrap()),
            3,
        )
        .unwrap();

        let suggestion = ProductionSuggestion::from_items(vec![a, b]).unwrap();
        assert_eq!(suggestion.total_value, Decimal::from_str("201.05").unwrap());
        assert_eq!(suggestion.total_quantity(), 5);
        assert_eq!(suggestion.item(2).map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_empty_suggestion_json() {
        let json = serde_json::to_string(&ProductionSuggestion::empty()).unwrap();
        assert_eq!(json, r#"{"items":[],"totalValue":0}"#);
    }

    #[test]
    fn test_suggestion_json_shape() {
        let item = ProductionItem::for_product(&product_a(), 10).unwrap();
        let suggestion = ProductionSuggestion::from_items(vec![item]).unwrap();

        let json = serde_json::to_string(&suggestion).unwrap();
        assert_eq!(
            json,
            r#"{"items":[{"productId":1,"productName":"Product A","productValue":100.00,"quantity":10,"subtotal":1000.00}],"totalValue":1000.00}"#
        );
    }

    #[test]
    fn test_large_quantity_json() {
        let item =
            ProductionItem::for_product(&Product::new(1, "Bolt", Decimal::ONE), 10u128.pow(28))
                .unwrap();

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"productId":1,"productName":"Bolt","productValue":1,"quantity":10000000000000000000000000000,"subtotal":10000000000000000000000000000}"#
        );
    }
}
