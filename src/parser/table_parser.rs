use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::Table;

lazy_static! {
    static ref RE_TABLE_CAPTION: Regex = Regex::new(r"(?i)^Table\s+(\d+)[.:]?\s*(.*)$").unwrap();
    // Cells are separated by a tab or a run of 2+ spaces
    static ref RE_CELL_SEP: Regex = Regex::new(r"\t|\s{2,}").unwrap();
}

pub struct TableParser {
    min_rows: usize,
}

impl TableParser {
    pub fn new(min_rows: usize) -> Self {
        // a header plus one body row is the smallest grid worth keeping
        Self { min_rows: min_rows.max(2) }
    }

    /// 从单页的非空行中检测表格，anchor_line 为页内行号
    pub fn extract(&self, lines: &[String], page: u32) -> Vec<Table> {
        let mut tables: Vec<Table> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let trimmed = lines[i].trim();

            // Look for "Table N" caption lines
            if RE_TABLE_CAPTION.is_match(trimmed) {
                let caption = Some(trimmed.to_string());
                let anchor = i;
                i += 1;

                let start = i;
                while i < lines.len() && Self::looks_like_table_row(&lines[i]) {
                    i += 1;
                }

                // Captioned tables only need a header and one row
                if i - start >= 2 {
                    if let Some((headers, rows)) = Self::parse_rows(&lines[start..i]) {
                        debug!("检测到表格: {:?}, 第 {} 页, {} 行", caption, page, rows.len());
                        tables.push(Table {
                            page,
                            anchor_line: Some(anchor),
                            caption,
                            headers,
                            rows,
                        });
                    }
                }
                continue;
            }

            // Detect column-aligned blocks without "Table N" caption
            if Self::looks_like_table_row(trimmed) {
                let start = i;
                while i < lines.len() && Self::looks_like_table_row(&lines[i]) {
                    i += 1;
                }

                if i - start >= self.min_rows {
                    if let Some((headers, rows)) = Self::parse_rows(&lines[start..i]) {
                        debug!("检测到无标题表格: 第 {} 页, {} 列, {} 行", page, headers.len(), rows.len());
                        tables.push(Table {
                            page,
                            anchor_line: Some(start),
                            caption: None,
                            headers,
                            rows,
                        });
                    }
                }
                continue;
            }

            i += 1;
        }

        tables
    }

    /// Check if a line looks like a table row
    fn looks_like_table_row(line: &str) -> bool {
        let line = line.trim();
        if line.len() < 5 {
            return false;
        }
        Self::split_cells(line).len() >= 2
    }

    fn split_cells(line: &str) -> Vec<String> {
        RE_CELL_SEP
            .split(line.trim())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse raw text rows into headers and data rows
    fn parse_rows(raw_rows: &[String]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let (header_row, body) = raw_rows.split_first()?;

        let headers = Self::split_cells(header_row);
        if headers.len() < 2 {
            return None;
        }

        let rows: Vec<Vec<String>> = body.iter().map(|row| Self::split_cells(row)).collect();
        if rows.is_empty() {
            return None;
        }

        Some((headers, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn uncaptioned_block_needs_min_rows() {
        let page = lines(
            "3. Match List I with List II\n\
             List I    List II\n\
             Lok Sabha    Article 81\n\
             Rajya Sabha    Article 80\n\
             a) 1 only",
        );
        let tables = TableParser::new(3).extract(&page, 5);
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        assert_eq!(t.page, 5);
        assert_eq!(t.anchor_line, Some(1));
        assert_eq!(t.headers, vec!["List I", "List II"]);
        assert_eq!(t.rows[1], vec!["Rajya Sabha", "Article 80"]);

        assert!(TableParser::new(4).extract(&page, 5).is_empty());
    }

    #[test]
    fn captioned_table_keeps_caption() {
        let page = lines("Table 2: Rainfall\nState    mm\nKerala    3055\nNext paragraph");
        let tables = TableParser::new(3).extract(&page, 1);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].caption.as_deref(), Some("Table 2: Rainfall"));
        assert_eq!(tables[0].anchor_line, Some(0));
        assert_eq!(tables[0].rows, vec![vec!["Kerala".to_string(), "3055".to_string()]]);
    }

    #[test]
    fn prose_is_not_a_table() {
        let page = lines("Consider the following statements about the\nPreamble of the Constitution of India");
        assert!(TableParser::new(2).extract(&page, 1).is_empty());
    }
}
