use lopdf::Document;
use std::path::Path;
use tracing::{info, warn};

use super::{DocumentReader, RawDocument};
use crate::config::ReaderConfig;
use crate::utils::{ExtractError, ExtractResult};

fn ensure_exists(path: &Path) -> ExtractResult<()> {
    if !path.exists() {
        return Err(ExtractError::InputNotFound(path.display().to_string()));
    }
    Ok(())
}

pub struct PdfReader {
    config: ReaderConfig,
}

impl PdfReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// 逐页提取文本，单页失败时记为空页
    pub fn extract_pages(&self, pdf_path: &Path) -> ExtractResult<Vec<String>> {
        info!("解析PDF: {}", pdf_path.display());
        ensure_exists(pdf_path)?;

        let doc = Document::load(pdf_path).map_err(|e| ExtractError::ReadFailure {
            path: pdf_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!("第 {} 页文本提取失败: {}", page_number, e);
                    texts.push(String::new());
                }
            }
        }

        if texts.iter().all(|t| t.trim().is_empty()) {
            warn!("PDF中未提取到文本内容");
        } else {
            info!("成功提取 {} 页", texts.len());
        }
        Ok(texts)
    }
}

impl DocumentReader for PdfReader {
    fn read(&self, path: &Path) -> ExtractResult<RawDocument> {
        let pages = self.extract_pages(path)?;
        Ok(RawDocument::from_pages(&pages, &self.config))
    }
}

/// 纯文本（OCR 结果等），换页符 `\x0c` 分页
pub struct TextReader {
    config: ReaderConfig,
}

impl TextReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }
}

impl DocumentReader for TextReader {
    fn read(&self, path: &Path) -> ExtractResult<RawDocument> {
        info!("读取文本: {}", path.display());
        ensure_exists(path)?;

        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| ExtractError::ReadFailure {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages: Vec<&str> = text.split('\x0c').collect();
        Ok(RawDocument::from_pages(&pages, &self.config))
    }
}
