//! 生產建議服務：目錄提供者 → 庫存快照 → 分配引擎

use planner_core::{CatalogProvider, PlannerConfig};
use tokio_util::sync::CancellationToken;

use crate::allocator::AllocationEngine;
use crate::stock::StockSnapshot;
use crate::PlanResult;

/// 生產建議服務
///
/// 每次呼叫都重新讀取目錄並建立自己的庫存快照，呼叫之間不共享任何可變狀態。
pub struct ProductionPlanner<P> {
    provider: P,
    config: PlannerConfig,
}

impl<P: CatalogProvider> ProductionPlanner<P> {
    pub fn new(provider: P, config: PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// 計算生產建議
    pub fn suggest(&self) -> planner_core::Result<PlanResult> {
        self.suggest_with(AllocationEngine::new(self.config.clone()))
    }

    /// 計算生產建議（可被協作式取消）
    pub fn suggest_cancellable(&self, token: CancellationToken) -> planner_core::Result<PlanResult> {
        self.suggest_with(AllocationEngine::new(self.config.clone()).with_cancellation(token))
    }

    fn suggest_with(&self, engine: AllocationEngine) -> planner_core::Result<PlanResult> {
        let products = self.provider.products_by_value_desc()?;
        let stock = StockSnapshot::initialize(&products);
        engine.run(&products, stock)
    }

    /// 獲取目錄提供者引用
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}
