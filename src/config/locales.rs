use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::storage::models::Difficulty;
use crate::utils::{ExtractError, ExtractResult};

/// 单个语言的关键词表
///
/// 题号、选项、答案、解析、出处、难度六类行标记都按语言列在这里，
/// 新增语言只需追加一个条目，不改动状态机。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Locale {
    pub name: String,
    /// 是否为第二语言（双语题目检测依据）
    #[serde(default)]
    pub secondary: bool,
    /// Unicode 码点区间，闭区间 [start, end]
    #[serde(default)]
    pub script_ranges: Vec<[u32; 2]>,
    pub question_keywords: Vec<String>,
    /// 依次对应 a, b, c, d
    pub option_labels: Vec<String>,
    pub answer_keywords: Vec<String>,
    pub explanation_keywords: Vec<String>,
    pub source_keywords: Vec<String>,
    pub difficulty_keywords: Vec<String>,
    pub difficulty_synonyms: BTreeMap<String, Difficulty>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocaleConfig {
    pub locales: Vec<Locale>,
}

impl LocaleConfig {
    pub fn load() -> ExtractResult<Self> {
        Self::load_from(PathBuf::from("config/locales.toml"))
    }

    pub fn load_from(config_path: impl AsRef<Path>) -> ExtractResult<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: LocaleConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ExtractResult<()> {
        if self.locales.is_empty() {
            return Err(ExtractError::ConfigError("至少需要一个语言配置".to_string()));
        }
        for locale in &self.locales {
            if locale.option_labels.len() != 4 {
                return Err(ExtractError::ConfigError(format!(
                    "语言 {} 的选项标签必须恰好4个，实际 {} 个",
                    locale.name,
                    locale.option_labels.len()
                )));
            }
            for [start, end] in &locale.script_ranges {
                if start > end || char::from_u32(*start).is_none() || char::from_u32(*end).is_none() {
                    return Err(ExtractError::ConfigError(format!(
                        "语言 {} 的字符区间无效: {:#06x}..{:#06x}",
                        locale.name, start, end
                    )));
                }
            }
        }
        Ok(())
    }

    /// 所有第二语言的字符区间
    pub fn secondary_script_ranges(&self) -> Vec<(char, char)> {
        self.locales
            .iter()
            .filter(|l| l.secondary)
            .flat_map(|l| l.script_ranges.iter())
            .filter_map(|[start, end]| Some((char::from_u32(*start)?, char::from_u32(*end)?)))
            .collect()
    }

    pub fn to_toml(&self) -> ExtractResult<String> {
        toml::to_string_pretty(self).map_err(|e| ExtractError::ConfigError(e.to_string()))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: vec![
                Locale {
                    name: "English".to_string(),
                    secondary: false,
                    script_ranges: Vec::new(),
                    question_keywords: strings(&["Q", "Question"]),
                    option_labels: strings(&["a", "b", "c", "d"]),
                    answer_keywords: strings(&["Answer", "Ans"]),
                    explanation_keywords: strings(&["Explanation", "Hint"]),
                    source_keywords: strings(&["Source"]),
                    difficulty_keywords: strings(&["Difficulty"]),
                    difficulty_synonyms: BTreeMap::from([
                        ("Easy".to_string(), Difficulty::Easy),
                        ("Moderate".to_string(), Difficulty::Moderate),
                        ("Medium".to_string(), Difficulty::Moderate),
                        ("Difficult".to_string(), Difficulty::Hard),
                        ("Hard".to_string(), Difficulty::Hard),
                    ]),
                },
                Locale {
                    name: "Hindi".to_string(),
                    secondary: true,
                    script_ranges: vec![[0x0900, 0x097F]],
                    question_keywords: strings(&["प्रश्न"]),
                    option_labels: strings(&["क", "ख", "ग", "घ"]),
                    answer_keywords: strings(&["सही उत्तर", "उत्तर"]),
                    explanation_keywords: strings(&["व्याख्या"]),
                    source_keywords: strings(&["स्रोत"]),
                    difficulty_keywords: strings(&["कठिनाई"]),
                    difficulty_synonyms: BTreeMap::from([
                        ("आसान".to_string(), Difficulty::Easy),
                        ("मध्यम".to_string(), Difficulty::Moderate),
                        ("कठिन".to_string(), Difficulty::Hard),
                    ]),
                },
            ],
        }
    }
}
