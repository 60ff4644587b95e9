use serde::{Deserialize, Serialize};
use std::fmt;

/// 选项字母，序列化为小写 "a".."d"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [OptionLetter::A, OptionLetter::B, OptionLetter::C, OptionLetter::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 难度标签（封闭词表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// 题目不完整的原因，题目仍会输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionIssue {
    MissingOptionA,
    MissingOptionB,
    AnswerOptionEmpty,
}

/// 单道选择题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_number: u32,
    pub question_text_en: String,
    pub question_text_hi: Option<String>,
    pub has_table: bool,
    pub table_html: Option<String>,
    pub option_a_en: String,
    pub option_b_en: String,
    pub option_c_en: Option<String>,
    pub option_d_en: Option<String>,
    pub option_a_hi: Option<String>,
    pub option_b_hi: Option<String>,
    pub option_c_hi: Option<String>,
    pub option_d_hi: Option<String>,
    pub correct_option: Option<OptionLetter>,
    pub explanation_en: Option<String>,
    pub explanation_hi: Option<String>,
    pub source: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<QuestionIssue>,
}

impl Question {
    /// 主语言选项文本，空字符串视为缺失
    pub fn option_en(&self, letter: OptionLetter) -> Option<&str> {
        let text = match letter {
            OptionLetter::A => Some(self.option_a_en.as_str()),
            OptionLetter::B => Some(self.option_b_en.as_str()),
            OptionLetter::C => self.option_c_en.as_deref(),
            OptionLetter::D => self.option_d_en.as_deref(),
        };
        text.filter(|t| !t.is_empty())
    }

    pub fn option_hi_mut(&mut self, letter: OptionLetter) -> &mut Option<String> {
        match letter {
            OptionLetter::A => &mut self.option_a_hi,
            OptionLetter::B => &mut self.option_b_hi,
            OptionLetter::C => &mut self.option_c_hi,
            OptionLetter::D => &mut self.option_d_hi,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// 一套完整的模拟试卷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockTest {
    pub id: String,
    pub title_en: String,
    pub title_hi: Option<String>,
    pub subject: String,
    pub total_questions: usize,
    pub time_limit_minutes: u32,
    pub difficulty: Difficulty,
    pub source: Option<String>,
    pub created_at: String,
    pub questions: Vec<Question>,
}
