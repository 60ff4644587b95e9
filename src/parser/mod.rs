pub mod pdf_parser;
pub mod table_parser;

pub use pdf_parser::{PdfReader, TextReader};
pub use table_parser::TableParser;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::config::ReaderConfig;
use crate::utils::{html_escape, ExtractResult};

/// 带页码的一行文本（已去除首尾空白，非空）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedLine {
    pub page: u32,
    pub text: String,
}

/// 提取的表格，第一行为表头
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub page: u32,
    /// 检测到表格时所在的全局行号
    pub anchor_line: Option<usize>,
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 渲染为独立的 HTML 片段，标题放入 caption，短行补齐空单元格
    pub fn to_html(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut html = String::from(r#"<table class="question-table">"#);
        if let Some(caption) = &self.caption {
            html.push_str(&format!("<caption>{}</caption>", html_escape(caption)));
        }
        html.push_str("<thead><tr>");
        for i in 0..width {
            let cell = self.headers.get(i).map(String::as_str).unwrap_or("");
            html.push_str(&format!("<th>{}</th>", html_escape(cell)));
        }
        html.push_str("</tr></thead>");

        if !self.rows.is_empty() {
            html.push_str("<tbody>");
            for row in &self.rows {
                html.push_str("<tr>");
                for i in 0..width {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    html.push_str(&format!("<td>{}</td>", html_escape(cell)));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody>");
        }

        html.push_str("</table>");
        html
    }
}

/// 读取结果：完整的行序列与表格列表，解析前一次性物化
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub page_count: usize,
    pub lines: Vec<TaggedLine>,
    pub tables: Vec<Table>,
}

impl RawDocument {
    /// 由逐页文本构建，页码从1开始
    pub fn from_pages<S: AsRef<str>>(pages: &[S], config: &ReaderConfig) -> Self {
        let table_parser = TableParser::new(config.min_table_rows);
        let mut doc = RawDocument {
            page_count: pages.len(),
            ..Default::default()
        };

        for (i, page_text) in pages.iter().enumerate() {
            let page = (i + 1) as u32;
            let offset = doc.lines.len();

            let page_text: &str = page_text.as_ref();
            let page_lines: Vec<String> = page_text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            if config.detect_tables {
                let mut tables = table_parser.extract(&page_lines, page);
                for table in &mut tables {
                    table.anchor_line = table.anchor_line.map(|local| local + offset);
                }
                doc.tables.extend(tables);
            }

            debug!("第 {} 页: {} 行", page, page_lines.len());
            doc.lines
                .extend(page_lines.into_iter().map(|text| TaggedLine { page, text }));
        }

        info!(
            "文档物化完成: {} 页, {} 行, {} 个表格",
            doc.page_count,
            doc.lines.len(),
            doc.tables.len()
        );
        doc
    }
}

/// 外部文档读取能力
pub trait DocumentReader {
    fn read(&self, path: &Path) -> ExtractResult<RawDocument>;
}

/// 按扩展名选择读取器，非 PDF 一律按文本处理
pub fn reader_for_path(path: &Path, config: &ReaderConfig) -> Box<dyn DocumentReader> {
    let is_pdf = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if is_pdf {
        Box::new(PdfReader::new(config.clone()))
    } else {
        Box::new(TextReader::new(config.clone()))
    }
}
