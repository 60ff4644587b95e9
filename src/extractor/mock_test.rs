use uuid::Uuid;

use crate::storage::models::{Difficulty, MockTest, Question};

/// 试卷级元数据，由命令行或配置提供
#[derive(Debug, Clone)]
pub struct TestInfo {
    pub title_en: String,
    pub title_hi: Option<String>,
    pub subject: String,
    pub time_limit_minutes: u32,
}

/// 众数，平票时取最先出现的标签
pub fn dominant_difficulty(questions: &[Question]) -> Option<Difficulty> {
    let mut counts: Vec<(Difficulty, usize)> = Vec::new();
    for q in questions {
        match counts.iter_mut().find(|(d, _)| *d == q.difficulty) {
            Some((_, n)) => *n += 1,
            None => counts.push((q.difficulty, 1)),
        }
    }
    // max_by_key keeps the last maximum, so scan in reverse to keep the first
    counts.into_iter().rev().max_by_key(|(_, n)| *n).map(|(d, _)| d)
}

pub fn first_source(questions: &[Question]) -> Option<String> {
    questions
        .iter()
        .filter_map(|q| q.source.as_deref())
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

pub fn assemble_mock_test(questions: Vec<Question>, info: TestInfo, default_difficulty: Difficulty) -> MockTest {
    let difficulty = dominant_difficulty(&questions).unwrap_or(default_difficulty);
    let source = first_source(&questions);

    MockTest {
        id: Uuid::new_v4().to_string(),
        title_en: info.title_en,
        title_hi: info.title_hi,
        subject: info.subject,
        total_questions: questions.len(),
        time_limit_minutes: info.time_limit_minutes,
        difficulty,
        source,
        created_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(difficulty: Difficulty, source: Option<&str>) -> Question {
        Question {
            id: Uuid::new_v4().to_string(),
            question_number: 1,
            question_text_en: "Q".to_string(),
            question_text_hi: None,
            has_table: false,
            table_html: None,
            option_a_en: "x".to_string(),
            option_b_en: "y".to_string(),
            option_c_en: None,
            option_d_en: None,
            option_a_hi: None,
            option_b_hi: None,
            option_c_hi: None,
            option_d_hi: None,
            correct_option: None,
            explanation_en: None,
            explanation_hi: None,
            source: source.map(str::to_string),
            difficulty,
            issues: Vec::new(),
        }
    }

    fn info() -> TestInfo {
        TestInfo {
            title_en: "Polity Mock 1".to_string(),
            title_hi: Some("राजव्यवस्था टेस्ट 1".to_string()),
            subject: "Polity".to_string(),
            time_limit_minutes: 90,
        }
    }

    #[test]
    fn mode_breaks_ties_by_first_seen() {
        let qs = vec![
            q(Difficulty::Hard, None),
            q(Difficulty::Easy, None),
            q(Difficulty::Easy, None),
            q(Difficulty::Hard, None),
        ];
        assert_eq!(dominant_difficulty(&qs), Some(Difficulty::Hard));

        let qs = vec![q(Difficulty::Easy, None), q(Difficulty::Hard, None), q(Difficulty::Hard, None)];
        assert_eq!(dominant_difficulty(&qs), Some(Difficulty::Hard));
        assert_eq!(dominant_difficulty(&[]), None);
    }

    #[test]
    fn source_is_first_non_empty() {
        let qs = vec![q(Difficulty::Easy, None), q(Difficulty::Easy, Some("  ")), q(Difficulty::Easy, Some("PIB"))];
        assert_eq!(first_source(&qs).as_deref(), Some("PIB"));
    }

    #[test]
    fn builds_summary() {
        let test = assemble_mock_test(
            vec![q(Difficulty::Easy, Some("NCERT")), q(Difficulty::Easy, None)],
            info(),
            Difficulty::Moderate,
        );
        assert_eq!(test.total_questions, 2);
        assert_eq!(test.difficulty, Difficulty::Easy);
        assert_eq!(test.source.as_deref(), Some("NCERT"));
        assert_eq!(test.time_limit_minutes, 90);
        assert_eq!(test.title_hi.as_deref(), Some("राजव्यवस्था टेस्ट 1"));
        assert!(chrono::NaiveDateTime::parse_from_str(&test.created_at, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn empty_test_uses_default_difficulty() {
        let test = assemble_mock_test(Vec::new(), info(), Difficulty::Moderate);
        assert_eq!(test.total_questions, 0);
        assert_eq!(test.difficulty, Difficulty::Moderate);
        assert_eq!(test.source, None);
    }
}
