pub mod locales;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::models::Difficulty;
use crate::utils::{ExtractError, ExtractResult};

pub use locales::{Locale, LocaleConfig};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub extractor: ExtractorConfig,
    pub reader: ReaderConfig,
}

/// 试卷级默认值，命令行参数优先
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    pub subject: String,
    pub test_name: String,
    pub time_limit_minutes: u32,
    /// 未出现难度行的题目使用此难度
    pub default_difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    pub detect_tables: bool,
    /// 无标题表格至少需要的连续行数（含表头）
    pub min_table_rows: usize,
}

impl AppConfig {
    pub fn load() -> ExtractResult<Self> {
        Self::load_from(PathBuf::from("config/settings.toml"))
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> ExtractResult<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ExtractResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ExtractError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig {
                subject: "General".to_string(),
                test_name: "Mock Test".to_string(),
                time_limit_minutes: 120,
                default_difficulty: Difficulty::Moderate,
            },
            reader: ReaderConfig {
                detect_tables: true,
                min_table_rows: 3,
            },
        }
    }
}
