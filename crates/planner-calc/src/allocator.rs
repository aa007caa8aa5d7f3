//! 貪婪分配引擎

use planner_core::{PlanError, PlannerConfig, Product};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::assembler::SuggestionAssembler;
use crate::feasibility::FeasibilityCalculator;
use crate::stock::StockSnapshot;
use crate::{PlanResult, PlanWarning};

/// 分配引擎
///
/// 反覆依優先順序掃描所有產品，每輪對每個產品生產當下可行的最大單位並扣減快照庫存，
/// 直到某一輪沒有任何產出為止。
pub struct AllocationEngine {
    /// 計算參數
    config: PlannerConfig,

    /// 協作式取消（每輪開始前檢查）
    cancellation: Option<CancellationToken>,
}

impl AllocationEngine {
    /// 創建新的分配引擎
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// 建構器模式：設置取消令牌
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// 以產品本身帶的庫存初始化快照後計算
    pub fn suggest(&self, products: &[Product]) -> planner_core::Result<PlanResult> {
        let stock = StockSnapshot::initialize(products);
        self.run(products, stock)
    }

    /// 主計算入口
    ///
    /// `products` 必須已按價值遞減排序，引擎內不會重新排序。
    pub fn run(
        &self,
        products: &[Product],
        mut stock: StockSnapshot,
    ) -> planner_core::Result<PlanResult> {
        let mut result = PlanResult::empty();
        let span = tracing::info_span!("production_suggestion", run_id = %result.run_id);
        let _guard = span.enter();

        tracing::info!(
            "開始生產建議計算：產品 {} 筆，原物料 {} 筆",
            products.len(),
            stock.len()
        );
        let start_time = std::time::Instant::now();

        if self.config.record_warnings {
            for warning in Self::inspect(products) {
                result.add_warning(warning);
            }
        }

        let mut assembler = SuggestionAssembler::new();
        let mut passes = 0u32;

        loop {
            if self.is_cancelled() {
                tracing::warn!("計算已取消，已完成 {} 輪", passes);
                return Err(PlanError::Cancelled { passes });
            }
            if self.config.pass_limit_reached(passes) {
                tracing::warn!("超過最大計算輪數 {}", self.config.max_passes);
                return Err(PlanError::PassLimitExceeded {
                    max_passes: self.config.max_passes,
                });
            }

            passes += 1;
            let produced = Self::run_pass(products, &mut stock, &mut assembler)?;
            tracing::debug!("第 {} 輪完成，有產出: {}", passes, produced);

            if !produced {
                break;
            }
        }

        result.suggestion = assembler.finish()?;
        result.passes = passes;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("生產建議計算完成，耗時 {:?}，共 {} 輪", start_time.elapsed(), passes);
        tracing::info!(
            "建議項目: {} 筆，總價值: {}",
            result.suggestion.items.len(),
            result.suggestion.total_value
        );

        Ok(result)
    }

    /// 執行一輪掃描，回傳本輪是否有任何產出
    fn run_pass(
        products: &[Product],
        stock: &mut StockSnapshot,
        assembler: &mut SuggestionAssembler,
    ) -> planner_core::Result<bool> {
        let mut produced = false;

        for product in products {
            if !product.has_bill_of_materials() {
                continue;
            }

            let units = FeasibilityCalculator::max_units(product, stock)?;
            if units == 0 {
                continue;
            }

            Self::reserve(product, units, stock)?;
            assembler.record(product, units)?;
            produced = true;

            tracing::debug!("產品 {} 生產 {} 單位", product.id, units);
        }

        Ok(produced)
    }

    /// 依產量扣減每種原物料的總用量（同一原物料的多行合併扣減）
    fn reserve(
        product: &Product,
        units: u128,
        stock: &mut StockSnapshot,
    ) -> planner_core::Result<()> {
        for (raw_material_id, required) in FeasibilityCalculator::requirements(product)? {
            let amount = Decimal::from_u128(units)
                .and_then(|units| required.checked_mul(units))
                .ok_or_else(|| {
                    PlanError::ArithmeticOverflow(format!(
                        "原物料 {} 用量 {} × {}",
                        raw_material_id, required, units
                    ))
                })?;
            stock.deduct(raw_material_id, amount);
        }
        Ok(())
    }

    /// 檢查物料清單異常（每次計算只記錄一次）
    fn inspect(products: &[Product]) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();

        for product in products {
            if !product.has_bill_of_materials() {
                tracing::debug!("產品 {} 沒有物料清單，跳過", product.id);
                warnings.push(PlanWarning::info(
                    product.id,
                    "沒有物料清單，不會被生產".to_string(),
                ));
                continue;
            }

            for line in product.malformed_lines() {
                tracing::warn!(
                    "產品 {} 的原物料 {} 用量 {} <= 0，不作為限制條件",
                    product.id,
                    line.raw_material_id,
                    line.required_quantity
                );
                warnings.push(PlanWarning::warning(
                    product.id,
                    format!(
                        "原物料 {} 用量 {} <= 0，已忽略",
                        line.raw_material_id, line.required_quantity
                    ),
                ));
            }
        }

        warnings
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|token| token.is_cancelled())
            .unwrap_or(false)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
