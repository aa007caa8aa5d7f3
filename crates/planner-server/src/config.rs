//! 應用配置加載（TOML 檔案 + 環境變數）

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use planner_core::PlannerConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 環境變數前綴，巢狀欄位以 `__` 分隔
pub const ENV_PREFIX: &str = "PLANNER_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置載入失敗: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("無效的監聽位址: {0}")]
    InvalidAddress(String),
}

/// 伺服器配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// 日誌配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,

    /// 以 JSON 格式輸出日誌
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// 計算配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    #[serde(flatten)]
    pub engine: PlannerConfig,

    /// 單次計算逾時（毫秒）
    pub calculation_timeout_ms: u64,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            engine: PlannerConfig::default(),
            calculation_timeout_ms: 5000,
        }
    }
}

impl PlannerSection {
    pub fn calculation_timeout(&self) -> Duration {
        Duration::from_millis(self.calculation_timeout_ms.max(1))
    }
}

/// 目錄配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 啟動時載入的種子資料（JSON）
    pub seed_file: Option<PathBuf>,
}

/// 應用配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub planner: PlannerSection,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// 從配置目錄下的 `default.toml` 與環境變數加載配置
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::figment(config_dir))
    }

    /// 配置來源（後者覆寫前者）
    pub fn figment(config_dir: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Toml::file(config_dir.as_ref().join("default.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::extract(Figment::new()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.planner.engine.max_passes, 1000);
        assert_eq!(config.planner.calculation_timeout(), Duration::from_millis(5000));
        assert!(config.catalog.seed_file.is_none());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [telemetry]
            json = true

            [planner]
            max_passes = 50
            calculation_timeout_ms = 250

            [catalog]
            seed_file = "data/seed.json"
        "#;

        let config = AppConfig::extract(Figment::new().merge(Toml::string(toml))).unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert!(config.telemetry.json);
        assert_eq!(config.planner.engine.max_passes, 50);
        assert!(config.planner.engine.record_warnings);
        assert_eq!(config.planner.calculation_timeout(), Duration::from_millis(250));
        assert_eq!(config.catalog.seed_file, Some(PathBuf::from("data/seed.json")));
    }

    #[test]
    fn test_missing_config_dir_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::extract(
            Figment::new().merge(Toml::file(dir.path().join("default.toml"))),
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_address() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();

        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
