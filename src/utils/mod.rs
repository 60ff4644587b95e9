pub mod logger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("输入文件不存在: {0}")]
    InputNotFound(String),

    #[error("文档读取失败: {path}: {reason}")]
    ReadFailure { path: String, reason: String },

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("识别规则无效: {0}")]
    PatternError(#[from] regex::Error),

    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML解析错误: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// 文本中是否含有落在任一区间内的字符
pub fn contains_script(text: &str, ranges: &[(char, char)]) -> bool {
    text.chars()
        .any(|c| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c)))
}

/// 以单个空格拼接到已有文本之后
pub fn append_spaced(target: &mut String, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(fragment);
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
