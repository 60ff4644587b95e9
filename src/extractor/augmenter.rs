use tracing::{debug, info};

use crate::parser::Table;
use crate::storage::models::{OptionLetter, Question};

use super::assembler::AssembledQuestion;
use super::patterns::PatternRegistry;

/// 双语检测与表格关联
pub struct Augmenter<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> Augmenter<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    pub fn augment(&self, mut assembled: Vec<AssembledQuestion>, tables: &[Table]) -> Vec<Question> {
        let mut bilingual = 0;
        for item in &mut assembled {
            if self.mark_bilingual(&mut item.question) {
                bilingual += 1;
            }
        }

        for table in tables {
            let owners = owners_of(table, &assembled);
            if owners.is_empty() {
                debug!("第 {} 页的表格没有对应题目", table.page);
                continue;
            }
            let markup = table.to_html();
            for idx in owners {
                attach_table(&mut assembled[idx].question, &markup);
            }
        }

        let with_tables = assembled.iter().filter(|a| a.question.has_table).count();
        info!("双语题目 {} 道, 含表格题目 {} 道", bilingual, with_tables);

        assembled.into_iter().map(|a| a.question).collect()
    }

    /// 第二语言字段直接复制原文，不做翻译或拆分
    fn mark_bilingual(&self, question: &mut Question) -> bool {
        let body_bilingual = self.registry.is_secondary(&question.question_text_en);
        if body_bilingual {
            question.question_text_hi = Some(question.question_text_en.clone());
        }

        for letter in OptionLetter::ALL {
            let text = match question.option_en(letter) {
                Some(t) if self.registry.is_secondary(t) => t.to_string(),
                _ => continue,
            };
            *question.option_hi_mut(letter) = Some(text);
        }

        if let Some(explanation) = &question.explanation_en {
            if self.registry.is_secondary(explanation) {
                question.explanation_hi = Some(explanation.clone());
            }
        }

        body_bilingual
    }
}

/// Anchored tables go to the question holding the anchor line; otherwise
/// every question whose page span covers the table's page.
fn owners_of(table: &Table, assembled: &[AssembledQuestion]) -> Vec<usize> {
    if let Some(anchor) = table.anchor_line {
        if let Some(idx) = assembled.iter().position(|a| a.lines.contains(&anchor)) {
            return vec![idx];
        }
    }
    assembled
        .iter()
        .enumerate()
        .filter(|(_, a)| a.pages.contains(&table.page))
        .map(|(i, _)| i)
        .collect()
}

fn attach_table(question: &mut Question, markup: &str) {
    question.has_table = true;
    match &mut question.table_html {
        Some(existing) => existing.push_str(markup),
        None => question.table_html = Some(markup.to_string()),
    }
}
