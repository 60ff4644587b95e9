use std::ops::RangeInclusive;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::parser::TaggedLine;
use crate::storage::models::{Difficulty, OptionLetter, Question, QuestionIssue};
use crate::utils::append_spaced;

use super::classifier::{classify, Field, LineRole, ParseState, RoleKind};
use super::patterns::PatternRegistry;

/// 组装完成的题目，附带其来源的页码与行号范围
#[derive(Debug, Clone)]
pub struct AssembledQuestion {
    pub question: Question,
    pub pages: RangeInclusive<u32>,
    pub lines: RangeInclusive<usize>,
}

/// 正在累积的题目
#[derive(Debug)]
struct Draft {
    number: u32,
    body: String,
    options: [Option<String>; 4],
    answer: Option<OptionLetter>,
    explanation: String,
    source: Option<String>,
    difficulty: Option<Difficulty>,
    first_page: u32,
    last_page: u32,
    first_line: usize,
    last_line: usize,
}

impl Draft {
    fn open(number: u32, text: String, index: usize, page: u32) -> Self {
        Self {
            number,
            body: text,
            options: Default::default(),
            answer: None,
            explanation: String::new(),
            source: None,
            difficulty: None,
            first_page: page,
            last_page: page,
            first_line: index,
            last_line: index,
        }
    }

    fn touch(&mut self, index: usize, page: u32) {
        self.first_page = self.first_page.min(page);
        self.last_page = self.last_page.max(page);
        self.last_line = index;
    }

    fn option_slot(&mut self, letter: OptionLetter) -> &mut Option<String> {
        &mut self.options[letter as usize]
    }
}

/// 单遍状态机：逐行分类并写入当前题目
pub struct QuestionAssembler<'a> {
    registry: &'a PatternRegistry,
    default_difficulty: Difficulty,
    state: ParseState,
    current: Option<Draft>,
    done: Vec<AssembledQuestion>,
    dropped: usize,
}

impl<'a> QuestionAssembler<'a> {
    pub fn new(registry: &'a PatternRegistry, default_difficulty: Difficulty) -> Self {
        Self {
            registry,
            default_difficulty,
            state: ParseState::default(),
            current: None,
            done: Vec::new(),
            dropped: 0,
        }
    }

    /// 消费一行，index 为全局行号
    pub fn feed(&mut self, index: usize, line: &TaggedLine) {
        let Some(role) = classify(self.registry, &line.text, &self.state) else {
            if !line.text.trim().is_empty() {
                debug!("丢弃无法归类的行 (第 {} 页): {}", line.page, line.text);
                self.dropped += 1;
            }
            return;
        };

        if let LineRole::QuestionStart { number, text } = role {
            self.close();
            self.current = Some(Draft::open(number, text, index, line.page));
            self.state = ParseState {
                question_open: true,
                answer_recorded: false,
                active: Some(Field::Body),
            };
            return;
        }

        let Some(draft) = self.current.as_mut() else {
            debug!("题目开始前的行被丢弃: {}", line.text);
            self.dropped += 1;
            return;
        };
        draft.touch(index, line.page);

        match role {
            LineRole::QuestionStart { .. } => unreachable!("handled above"),
            LineRole::Option { letter, text } => {
                // last write wins
                *draft.option_slot(letter) = Some(text);
                self.state.active = Some(Field::Option(letter));
            }
            LineRole::Answer { letter, residual } => {
                draft.answer = Some(letter);
                self.state.answer_recorded = true;
                if !residual.is_empty() {
                    let text = match self.registry.match_role(RoleKind::Explanation, &residual) {
                        Some(LineRole::Explanation(inner)) => inner,
                        _ => residual,
                    };
                    append_spaced(&mut draft.explanation, &text);
                }
                self.state.active = Some(Field::Explanation);
            }
            LineRole::Explanation(text) => {
                append_spaced(&mut draft.explanation, &text);
                self.state.active = Some(Field::Explanation);
            }
            LineRole::Source(text) => {
                draft.source = Some(text);
                self.state.active = None;
            }
            LineRole::Difficulty(difficulty) => {
                draft.difficulty = Some(difficulty);
                self.state.active = None;
            }
            LineRole::Continuation { target, text } => match target {
                Field::Body => append_spaced(&mut draft.body, &text),
                Field::Option(letter) => {
                    append_spaced(draft.option_slot(letter).get_or_insert_with(String::new), &text)
                }
                Field::Explanation => append_spaced(&mut draft.explanation, &text),
            },
        }
    }

    /// 关闭当前题目并输出，流中换题与流结束共用此步骤
    pub fn close(&mut self) {
        let Some(draft) = self.current.take() else {
            return;
        };
        self.state = ParseState::default();

        let assembled = self.finalize(draft);
        if assembled.question.is_incomplete() {
            warn!(
                "题目 {} 不完整: {:?}",
                assembled.question.question_number, assembled.question.issues
            );
        }
        self.done.push(assembled);
    }

    fn finalize(&self, draft: Draft) -> AssembledQuestion {
        let [a, b, c, d] = draft.options;
        let non_empty = |o: Option<String>| o.filter(|t| !t.is_empty());

        let mut question = Question {
            id: Uuid::new_v4().to_string(),
            question_number: draft.number,
            question_text_en: draft.body,
            question_text_hi: None,
            has_table: false,
            table_html: None,
            option_a_en: a.unwrap_or_default(),
            option_b_en: b.unwrap_or_default(),
            option_c_en: non_empty(c),
            option_d_en: non_empty(d),
            option_a_hi: None,
            option_b_hi: None,
            option_c_hi: None,
            option_d_hi: None,
            correct_option: draft.answer,
            explanation_en: Some(draft.explanation).filter(|e| !e.is_empty()),
            explanation_hi: None,
            source: draft.source,
            difficulty: draft.difficulty.unwrap_or(self.default_difficulty),
            issues: Vec::new(),
        };
        question.issues = validate(&question);

        AssembledQuestion {
            question,
            pages: draft.first_page..=draft.last_page,
            lines: draft.first_line..=draft.last_line,
        }
    }

    pub fn finish(mut self) -> Vec<AssembledQuestion> {
        self.close();
        if self.dropped > 0 {
            debug!("共丢弃 {} 行", self.dropped);
        }
        self.done
    }
}

/// 检查必填选项与答案指向
pub fn validate(question: &Question) -> Vec<QuestionIssue> {
    let mut issues = Vec::new();
    if question.option_a_en.is_empty() {
        issues.push(QuestionIssue::MissingOptionA);
    }
    if question.option_b_en.is_empty() {
        issues.push(QuestionIssue::MissingOptionB);
    }
    if let Some(letter) = question.correct_option {
        if question.option_en(letter).is_none() {
            issues.push(QuestionIssue::AnswerOptionEmpty);
        }
    }
    issues
}

/// 对整个行序列运行状态机
pub fn assemble(
    registry: &PatternRegistry,
    lines: &[TaggedLine],
    default_difficulty: Difficulty,
) -> Vec<AssembledQuestion> {
    let mut assembler = QuestionAssembler::new(registry, default_difficulty);
    for (index, line) in lines.iter().enumerate() {
        assembler.feed(index, line);
    }
    assembler.finish()
}
