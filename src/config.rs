use crate::error::{PlantDoctorError, Result};
use plant_doctor_common::DEFAULT_SERVICE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// サービスURLを上書きする環境変数
pub const SERVICE_URL_ENV: &str = "PLANT_DOCTOR_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub service_url: String,
    /// Noneならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantDoctorError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("plant-doctor").join("config.json"))
    }

    /// 解析サービスのURL
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn service_url(&self, override_url: Option<&str>) -> String {
        if let Some(url) = override_url.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }
        // 環境変数を優先
        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }
        self.service_url.clone()
    }

    pub fn set_service_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PlantDoctorError::Config(format!(
                "service URL must start with http:// or https://: {}",
                url
            )));
        }
        self.service_url = url;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: Option<u64>) -> Result<()> {
        self.timeout_seconds = seconds.filter(|s| *s > 0);
        self.save()
    }
}
