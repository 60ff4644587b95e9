//! 选择题 PDF/文本提取：把无结构的行流还原为结构化的题目与试卷。

pub mod config;
pub mod extractor;
pub mod parser;
pub mod storage;
pub mod utils;

pub use extractor::ExtractionPipeline;
pub use utils::{ExtractError, ExtractResult};
