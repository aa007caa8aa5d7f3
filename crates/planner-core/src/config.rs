//! 計算引擎配置模型

use serde::{Deserialize, Serialize};

/// 預設最大計算輪數
pub const DEFAULT_MAX_PASSES: u32 = 1000;

/// 生產建議計算參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 最大計算輪數（每輪開始前檢查）
    ///
    /// 用量遠小於庫存的病態輸入會使輪數變多，超過上限時計算中止。
    pub max_passes: u32,

    /// 是否記錄物料清單異常（用量 <= 0、空清單）的警告
    pub record_warnings: bool,
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            record_warnings: true,
        }
    }

    /// 建構器模式：設置最大計算輪數
    ///
    /// # 範例
    /// ```
    /// # use planner_core::PlannerConfig;
    /// let config = PlannerConfig::new().with_max_passes(10);
    /// assert_eq!(config.max_passes, 10);
    /// ```
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// 建構器模式：設置是否記錄警告
    pub fn with_record_warnings(mut self, record: bool) -> Self {
        self.record_warnings = record;
        self
    }

    /// 檢查輪數是否已達上限
    pub fn pass_limit_reached(&self, passes: u32) -> bool {
        passes >= self.max_passes.max(1)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.max_passes, DEFAULT_MAX_PASSES);
        assert!(config.record_warnings);
        assert!(!config.pass_limit_reached(0));
        assert!(config.pass_limit_reached(DEFAULT_MAX_PASSES));
    }

    #[test]
    fn test_config_builder() {
        let config = PlannerConfig::new()
            .with_max_passes(5)
            .with_record_warnings(false);

        assert_eq!(config.max_passes, 5);
        assert!(!config.record_warnings);
    }

    #[test]
    fn test_zero_max_passes_is_clamped() {
        // 至少允許一輪，否則連空目錄都無法完成
        let config = PlannerConfig::new().with_max_passes(0);
        assert_eq!(config.max_passes, 1);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: PlannerConfig = serde_json::from_str(r#"{"max_passes": 50}"#).unwrap();

        assert_eq!(config.max_passes, 50);
        assert!(config.record_warnings);
    }
}
