use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

use crate::config::LocaleConfig;
use crate::storage::models::{Difficulty, OptionLetter};
use crate::utils::{append_spaced, contains_script, ExtractResult};

use super::classifier::{LineRole, RoleKind};

type Extractor = fn(&PatternRegistry, &Captures) -> Option<LineRole>;

/// 一条识别规则：正则负责匹配，提取函数负责取出载荷，可拒绝命中
pub struct Rule {
    regex: Regex,
    extract: Extractor,
}

impl Rule {
    fn new(pattern: &str, extract: Extractor) -> ExtractResult<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            extract,
        })
    }
}

/// 六类行角色的有序规则表
pub struct PatternRegistry {
    question_start: Vec<Rule>,
    option: Vec<Rule>,
    answer: Vec<Rule>,
    explanation: Vec<Rule>,
    source: Vec<Rule>,
    difficulty: Vec<Rule>,
    labels: HashMap<String, OptionLetter>,
    difficulty_words: HashMap<String, Difficulty>,
    secondary_ranges: Vec<(char, char)>,
}

/// Escaped alternation, longest first so "Answer" wins over "Ans".
fn alternation<'a>(words: impl IntoIterator<Item = &'a String>) -> String {
    let mut words: Vec<&String> = words.into_iter().filter(|w| !w.trim().is_empty()).collect();
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    words.dedup();
    words
        .iter()
        .map(|w| regex::escape(w.trim()))
        .collect::<Vec<_>>()
        .join("|")
}

// Separator after a keyword: punctuation, whitespace, or end of line.
const KEYWORD_SEP: &str = r"(?:\s*[:：\-–.]\s*|\s+|$)";

impl PatternRegistry {
    pub fn from_locales(config: &LocaleConfig) -> ExtractResult<Self> {
        config.validate()?;

        let mut labels = HashMap::new();
        let mut difficulty_words = HashMap::new();
        for locale in &config.locales {
            for (i, label) in locale.option_labels.iter().enumerate() {
                if let Some(letter) = OptionLetter::from_index(i) {
                    labels.insert(label.trim().to_lowercase(), letter);
                }
            }
            for (word, difficulty) in &locale.difficulty_synonyms {
                difficulty_words.insert(word.trim().to_lowercase(), *difficulty);
            }
        }

        let all_labels = alternation(config.locales.iter().flat_map(|l| l.option_labels.iter()));
        let all_difficulty_words = alternation(config.locales.iter().flat_map(|l| l.difficulty_synonyms.keys()));

        let mut question_start = Vec::new();
        let mut option = Vec::new();
        let mut answer = Vec::new();
        let mut explanation = Vec::new();
        let mut source = Vec::new();
        let mut difficulty = Vec::new();

        for locale in &config.locales {
            if !locale.question_keywords.is_empty() {
                // Q1. / Q.1 / Q1: / Question 1 / प्रश्न 1
                question_start.push(Rule::new(
                    &format!(
                        r"(?i)^(?:{})\.?\s*(?P<num>\d{{1,4}})(?:\s*[.):：\-]\s*|\s+|$)(?P<rest>.*)$",
                        alternation(&locale.question_keywords)
                    ),
                    Self::extract_question_start,
                )?);
            }

            let own_labels = alternation(&locale.option_labels);
            // (a) text
            option.push(Rule::new(
                &format!(r"(?i)^\(\s*(?P<label>{})\s*\)\s*(?P<text>.*)$", own_labels),
                Self::extract_option,
            )?);
            // a) text / a. text
            option.push(Rule::new(
                &format!(r"(?i)^(?P<label>{})\s*[.)]\s*(?P<text>.*)$", own_labels),
                Self::extract_option,
            )?);

            // answer, source and difficulty may appear anywhere in a line
            if !locale.answer_keywords.is_empty() {
                answer.push(Rule::new(
                    &format!(
                        r"(?i)^(?P<pre>.*?)\b(?:{})\s*[:：.\-–]?\s*\(?\s*(?P<label>{})\b\s*\)?\s*[.,;:]?\s*(?P<rest>.*)$",
                        alternation(&locale.answer_keywords),
                        all_labels
                    ),
                    Self::extract_answer,
                )?);
            }

            if !locale.explanation_keywords.is_empty() {
                explanation.push(Rule::new(
                    &format!(
                        r"(?i)^(?:{}){}(?P<text>.*)$",
                        alternation(&locale.explanation_keywords),
                        KEYWORD_SEP
                    ),
                    Self::extract_explanation,
                )?);
            }

            if !locale.source_keywords.is_empty() {
                let keywords = alternation(&locale.source_keywords);
                source.push(Rule::new(
                    &format!(r"(?i)^(?:{}){}(?P<text>.*)$", keywords, KEYWORD_SEP),
                    Self::extract_source,
                )?);
                // mid-line only with a colon: "... 2023. Source: PIB"
                source.push(Rule::new(
                    &format!(r"(?i)\b(?:{})\s*[:：]\s*(?P<text>.*)$", keywords),
                    Self::extract_source,
                )?);
            }

            if !locale.difficulty_keywords.is_empty() && !all_difficulty_words.is_empty() {
                difficulty.push(Rule::new(
                    &format!(
                        r"(?i)\b(?:{})\s*[:：\-–]?\s*(?P<word>{})(?:[\s.,;:|)]|$)",
                        alternation(&locale.difficulty_keywords),
                        all_difficulty_words
                    ),
                    Self::extract_difficulty,
                )?);
            }
        }

        // 1. / 1)  -- a digit right after the dot means a decimal, not a question
        question_start.push(Rule::new(
            r"^(?P<num>\d{1,4})[.)](?P<rest>\s.*|[^\d\s].*|)$",
            Self::extract_question_start,
        )?);

        let registry = Self {
            question_start,
            option,
            answer,
            explanation,
            source,
            difficulty,
            labels,
            difficulty_words,
            secondary_ranges: config.secondary_script_ranges(),
        };
        debug!(
            "识别规则已构建: 题号 {} 条, 选项 {} 条, 答案 {} 条",
            registry.question_start.len(),
            registry.option.len(),
            registry.answer.len()
        );
        Ok(registry)
    }

    /// 内置英语/印地语规则
    pub fn builtin() -> ExtractResult<Self> {
        Self::from_locales(&LocaleConfig::default())
    }

    pub fn rules(&self, role: RoleKind) -> &[Rule] {
        match role {
            RoleKind::QuestionStart => &self.question_start,
            RoleKind::Option => &self.option,
            RoleKind::Answer => &self.answer,
            RoleKind::Explanation => &self.explanation,
            RoleKind::Source => &self.source,
            RoleKind::Difficulty => &self.difficulty,
        }
    }

    /// 按顺序尝试某一角色的规则，第一个命中者胜出
    pub fn match_role(&self, role: RoleKind, line: &str) -> Option<LineRole> {
        self.rules(role).iter().find_map(|rule| {
            let caps = rule.regex.captures(line)?;
            (rule.extract)(self, &caps)
        })
    }

    pub fn is_secondary(&self, text: &str) -> bool {
        contains_script(text, &self.secondary_ranges)
    }

    fn letter_for(&self, label: &str) -> Option<OptionLetter> {
        self.labels.get(&label.trim().to_lowercase()).copied()
    }

    fn extract_question_start(&self, caps: &Captures) -> Option<LineRole> {
        let number = caps.name("num")?.as_str().parse().ok()?;
        let text = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or_default();
        Some(LineRole::QuestionStart {
            number,
            text: text.to_string(),
        })
    }

    fn extract_option(&self, caps: &Captures) -> Option<LineRole> {
        let letter = self.letter_for(caps.name("label")?.as_str())?;
        let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or_default();
        Some(LineRole::Option {
            letter,
            text: text.to_string(),
        })
    }

    fn extract_answer(&self, caps: &Captures) -> Option<LineRole> {
        let letter = self.letter_for(caps.name("label")?.as_str())?;
        let pre = caps.name("pre").map(|m| m.as_str().trim()).unwrap_or_default();
        let rest = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or_default();

        // "Explanation: Ans (b) since ..." keeps its explanation prefix
        let mut residual = String::new();
        if !pre.is_empty() && self.match_role(RoleKind::Explanation, pre).is_some() {
            residual.push_str(pre);
        }
        append_spaced(&mut residual, rest);
        Some(LineRole::Answer { letter, residual })
    }

    fn extract_explanation(&self, caps: &Captures) -> Option<LineRole> {
        let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or_default();
        Some(LineRole::Explanation(text.to_string()))
    }

    fn extract_source(&self, caps: &Captures) -> Option<LineRole> {
        let text = caps.name("text")?.as_str().trim();
        if text.is_empty() {
            return None;
        }
        Some(LineRole::Source(text.to_string()))
    }

    fn extract_difficulty(&self, caps: &Captures) -> Option<LineRole> {
        let word = caps.name("word")?.as_str();
        self.difficulty_words
            .get(&word.to_lowercase())
            .map(|d| LineRole::Difficulty(*d))
    }
}
