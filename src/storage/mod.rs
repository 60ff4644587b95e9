pub mod export;
pub mod models;

pub use export::{export_to_json, load_from_json};
pub use models::{Difficulty, MockTest, OptionLetter, Question, QuestionIssue};
