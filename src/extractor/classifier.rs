use crate::storage::models::{Difficulty, OptionLetter};

use super::patterns::PatternRegistry;

/// 行角色种类，不含续行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    QuestionStart,
    Option,
    Answer,
    Explanation,
    Source,
    Difficulty,
}

/// 角色优先级，靠前者胜出且不再尝试其余角色
pub const ROLE_PRIORITY: [RoleKind; 6] = [
    RoleKind::QuestionStart,
    RoleKind::Option,
    RoleKind::Answer,
    RoleKind::Explanation,
    RoleKind::Source,
    RoleKind::Difficulty,
];

/// 续行追加的目标字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Body,
    Option(OptionLetter),
    Explanation,
}

/// 一行文本的分类结果及其载荷
#[derive(Debug, Clone, PartialEq)]
pub enum LineRole {
    QuestionStart { number: u32, text: String },
    Option { letter: OptionLetter, text: String },
    /// residual 为去掉 "Answer: b" 之后剩下的文本
    Answer { letter: OptionLetter, residual: String },
    Explanation(String),
    Source(String),
    Difficulty(Difficulty),
    Continuation { target: Field, text: String },
}

/// 分类器所需的解析状态快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    pub question_open: bool,
    pub answer_recorded: bool,
    /// 最近一次被写入的字段
    pub active: Option<Field>,
}

/// 判定一行文本的角色
///
/// 按 [`ROLE_PRIORITY`] 依次尝试，第一个命中的角色即为结果。全部落空时：
/// 尚无题目则丢弃（返回 `None`）；已记录答案则并入解析；否则并入最近写入的字段，
/// 默认题干。答案、出处与难度可出现在行中任意位置，且先于续行判定，
/// 所以行尾的元数据不会被解析吞掉。
pub fn classify(registry: &PatternRegistry, line: &str, state: &ParseState) -> Option<LineRole> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    for role in ROLE_PRIORITY {
        if let Some(matched) = registry.match_role(role, line) {
            return Some(matched);
        }
    }

    if !state.question_open {
        return None;
    }

    let target = if state.answer_recorded {
        Field::Explanation
    } else {
        state.active.unwrap_or(Field::Body)
    };
    Some(LineRole::Continuation {
        target,
        text: line.to_string(),
    })
}
