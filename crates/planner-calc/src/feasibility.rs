//! 可行產量計算

use planner_core::{PlanError, Product};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::stock::StockSnapshot;

/// 可行產量計算器
pub struct FeasibilityCalculator;

impl FeasibilityCalculator {
    /// 每單位產品對各原物料的總用量
    ///
    /// 只計入用量 > 0 的行，同一原物料的多行合併，依首次出現順序排列。
    pub fn requirements(product: &Product) -> planner_core::Result<Vec<(i64, Decimal)>> {
        let mut totals: Vec<(i64, Decimal)> = Vec::new();
        for line in product.constraining_lines() {
            match totals
                .iter_mut()
                .find(|(id, _)| *id == line.raw_material_id)
            {
                Some((id, total)) => {
                    *total = total.checked_add(line.required_quantity).ok_or_else(|| {
                        PlanError::ArithmeticOverflow(format!(
                            "產品 {} 原物料 {} 用量 {} + {}",
                            product.id, id, total, line.required_quantity
                        ))
                    })?;
                }
                None => totals.push((line.raw_material_id, line.required_quantity)),
            }
        }
        Ok(totals)
    }

    /// 受限產量：每種原物料 floor(可用 / 總用量) 的最小值
    ///
    /// 沒有任何用量 > 0 的行時回傳 `None`（不受限制，而非無限大）。
    pub fn constrained_units(
        product: &Product,
        stock: &StockSnapshot,
    ) -> planner_core::Result<Option<u128>> {
        Self::requirements(product)?
            .into_iter()
            .try_fold(None, |min: Option<u128>, (raw_material_id, required)| {
                let units = Self::units_from(stock.available(raw_material_id), required)?;
                Ok(Some(min.map_or(units, |m| m.min(units))))
            })
    }

    /// 本輪可再生產的最大整數單位
    ///
    /// 空物料清單、或沒有限制行的產品一律為 0。
    pub fn max_units(product: &Product, stock: &StockSnapshot) -> planner_core::Result<u128> {
        Ok(Self::constrained_units(product, stock)?.unwrap_or(0))
    }

    /// floor(available / required)，required 必須 > 0
    fn units_from(available: Decimal, required: Decimal) -> planner_core::Result<u128> {
        if available <= Decimal::ZERO {
            return Ok(0);
        }

        let overflow = || PlanError::ArithmeticOverflow(format!("產量 {} / {}", available, required));
        let units = available
            .checked_div(required)
            .and_then(|ratio| ratio.floor().to_u128())
            .ok_or_else(overflow)?;

        // 除法在第 28 位有效數字捨入，可能把略小於整數的商進位
        match Decimal::from_u128(units).and_then(|u| required.checked_mul(u)) {
            Some(consumed) if consumed > available => Ok(units.saturating_sub(1)),
            _ => Ok(units),
        }
    }
}
