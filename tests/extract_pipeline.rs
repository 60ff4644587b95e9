use std::path::PathBuf;
use std::process::Command;

use mcq_extract::config::{AppConfig, LocaleConfig};
use mcq_extract::extractor::{ExtractionPipeline, TestInfo};
use mcq_extract::storage::{export_to_json, load_from_json, Difficulty, OptionLetter};
use mcq_extract::ExtractError;

const SAMPLE: &str = "\
UPSC Prelims Mock Test - Polity
Time: 2 hours
Q1. Which of the following is a fundamental right?
a) Right to property
b) Right to equality
c) Right to work
d) Right to strike
Answer: (b)
Explanation: Articles 14-18 deal with the right to equality.
The right to property was removed by the 44th Amendment.
Source: Laxmikanth, Chapter 7
Difficulty: Easy
Q2. Consider the following statements about the Rajya Sabha:
It is a permanent body.
(a) Only the first statement is correct
(b) Neither statement
Ans: a
Difficulty: Medium
\x0c\
प्रश्न 3. राज्यसभा के सदस्य कितने वर्ष के लिए चुने जाते हैं? / Term of Rajya Sabha members?
(क) 5 वर्ष
(ख) 6 वर्ष
उत्तर: (ख)
व्याख्या: छह वर्ष
स्रोत: एनसीईआरटी
कठिनाई: आसान
\x0c\
4. Match List I with List II
List I    List II    Notes
Lok Sabha    Article 81
Rajya Sabha    Article 80    Upper house
a) 1-A, 2-B
b) 1-B, 2-A
Answer: a
Difficulty: Hard
5. Orphan question with nothing after it
";

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mcq-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn pipeline() -> ExtractionPipeline {
    ExtractionPipeline::new(AppConfig::default(), &LocaleConfig::default()).unwrap()
}

fn test_info() -> TestInfo {
    TestInfo {
        title_en: "Polity Mock 1".to_string(),
        title_hi: None,
        subject: "Polity".to_string(),
        time_limit_minutes: 60,
    }
}

#[test]
fn extracts_sample_document() {
    let dir = temp_dir();
    let input = dir.join("sample.txt");
    std::fs::write(&input, SAMPLE).unwrap();

    let questions = pipeline().process(&input).unwrap();
    assert_eq!(questions.len(), 5);

    let q1 = &questions[0];
    assert_eq!(q1.question_number, 1);
    assert_eq!(q1.option_b_en, "Right to equality");
    assert_eq!(q1.correct_option, Some(OptionLetter::B));
    assert_eq!(
        q1.explanation_en.as_deref(),
        Some("Articles 14-18 deal with the right to equality. The right to property was removed by the 44th Amendment.")
    );
    assert_eq!(q1.source.as_deref(), Some("Laxmikanth, Chapter 7"));
    assert_eq!(q1.difficulty, Difficulty::Easy);
    assert_eq!(q1.question_text_hi, None);

    let q2 = &questions[1];
    assert_eq!(
        q2.question_text_en,
        "Consider the following statements about the Rajya Sabha: It is a permanent body."
    );
    assert_eq!(q2.correct_option, Some(OptionLetter::A));
    assert_eq!(q2.option_c_en, None);
    assert_eq!(q2.difficulty, Difficulty::Moderate);
    assert!(q2.issues.is_empty());

    let q3 = &questions[2];
    assert_eq!(q3.question_number, 3);
    assert_eq!(q3.question_text_hi.as_deref(), Some(q3.question_text_en.as_str()));
    assert_eq!(q3.option_b_en, "6 वर्ष");
    assert_eq!(q3.option_b_hi.as_deref(), Some("6 वर्ष"));
    assert_eq!(q3.correct_option, Some(OptionLetter::B));
    assert_eq!(q3.explanation_hi.as_deref(), Some("छह वर्ष"));
    assert_eq!(q3.source.as_deref(), Some("एनसीईआरटी"));
    assert_eq!(q3.difficulty, Difficulty::Easy);
    assert!(!q3.has_table);

    let q4 = &questions[3];
    assert!(q4.has_table);
    let html = q4.table_html.as_deref().unwrap();
    assert!(html.contains("<th>List I</th><th>List II</th><th>Notes</th>"));
    assert!(html.contains("<td>Lok Sabha</td><td>Article 81</td><td></td>"));
    assert_eq!(q4.difficulty, Difficulty::Hard);

    let q5 = &questions[4];
    assert!(q5.is_incomplete());
    assert_eq!(q5.correct_option, None);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn mock_test_round_trips_through_json() {
    let dir = temp_dir();
    let input = dir.join("sample.txt");
    std::fs::write(&input, SAMPLE).unwrap();

    let p = pipeline();
    let questions = p.process(&input).unwrap();
    let mock_test = p.build_mock_test(questions.clone(), test_info());
    assert_eq!(mock_test.total_questions, 5);
    // Easy x2, Moderate x2, Hard x1 -> Easy seen first
    assert_eq!(mock_test.difficulty, Difficulty::Easy);
    assert_eq!(mock_test.source.as_deref(), Some("Laxmikanth, Chapter 7"));

    let output = dir.join("out").join("test.json");
    export_to_json(&mock_test, &output).unwrap();
    let loaded = load_from_json(&output).unwrap();
    assert_eq!(loaded.questions, questions);
    assert_eq!(loaded, mock_test);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_input_is_reported_before_parsing() {
    let err = pipeline().process(&PathBuf::from("does/not/exist.pdf")).unwrap_err();
    assert!(matches!(err, ExtractError::InputNotFound(_)));
}

#[test]
fn cli_writes_json_and_exits_zero() {
    let dir = temp_dir();
    std::fs::write(dir.join("sample.txt"), SAMPLE).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_mcq-extract"))
        .current_dir(&dir)
        .args([
            "extract",
            "sample.txt",
            "out.json",
            "--subject",
            "Polity",
            "--test-name",
            "Mock 3",
            "--title-secondary",
            "मॉक 3",
            "--time",
            "45",
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("out.json")).unwrap()).unwrap();
    assert_eq!(value["subject"], "Polity");
    assert_eq!(value["title_en"], "Mock 3");
    assert_eq!(value["title_hi"], "मॉक 3");
    assert_eq!(value["time_limit_minutes"], 45);
    assert_eq!(value["total_questions"], 5);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn cli_exits_one_without_questions_or_input() {
    let dir = temp_dir();
    std::fs::write(dir.join("blank.txt"), "Cover page\nGeneral instructions\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_mcq-extract"))
        .current_dir(&dir)
        .args(["extract", "blank.txt", "out.json"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!dir.join("out.json").exists());

    let status = Command::new(env!("CARGO_BIN_EXE_mcq-extract"))
        .current_dir(&dir)
        .args(["extract", "missing.pdf", "out.json"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));

    std::fs::remove_dir_all(dir).ok();
}
