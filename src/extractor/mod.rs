pub mod assembler;
pub mod augmenter;
pub mod classifier;
pub mod mock_test;
pub mod patterns;

pub use assembler::{assemble, AssembledQuestion, QuestionAssembler};
pub use augmenter::Augmenter;
pub use classifier::{classify, Field, LineRole, ParseState, RoleKind, ROLE_PRIORITY};
pub use mock_test::{assemble_mock_test, TestInfo};
pub use patterns::PatternRegistry;

use std::path::Path;
use tracing::{info, warn};

use crate::config::{AppConfig, LocaleConfig};
use crate::parser::{reader_for_path, RawDocument};
use crate::storage::models::{MockTest, Question};
use crate::utils::ExtractResult;

/// 统一提取管道：读取 -> 分行归类组装 -> 双语与表格补充 -> 组卷
pub struct ExtractionPipeline {
    registry: PatternRegistry,
    config: AppConfig,
}

impl ExtractionPipeline {
    pub fn new(config: AppConfig, locales: &LocaleConfig) -> ExtractResult<Self> {
        Ok(Self {
            registry: PatternRegistry::from_locales(locales)?,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 解析已物化的文档；空结果不是错误
    pub fn extract_questions(&self, doc: &RawDocument) -> Vec<Question> {
        let assembled = assemble(&self.registry, &doc.lines, self.config.extractor.default_difficulty);
        info!("识别到 {} 道题目", assembled.len());

        let questions = Augmenter::new(&self.registry).augment(assembled, &doc.tables);

        let flagged = questions.iter().filter(|q| q.is_incomplete()).count();
        if flagged > 0 {
            warn!("{} 道题目不完整，已标记", flagged);
        }
        questions
    }

    /// 读取文件并解析出题目
    pub fn process(&self, path: &Path) -> ExtractResult<Vec<Question>> {
        info!("开始提取管道: {}", path.display());
        let reader = reader_for_path(path, &self.config.reader);
        let doc = reader.read(path)?;
        Ok(self.extract_questions(&doc))
    }

    pub fn build_mock_test(&self, questions: Vec<Question>, info: TestInfo) -> MockTest {
        assemble_mock_test(questions, info, self.config.extractor.default_difficulty)
    }
}
