use std::path::Path;
use tracing::info;

use super::models::MockTest;
use crate::utils::ExtractResult;

/// 序列化为带缩进的 JSON，非 ASCII 字符原样保留
pub fn to_json_string(mock_test: &MockTest) -> ExtractResult<String> {
    Ok(serde_json::to_string_pretty(mock_test)?)
}

pub fn export_to_json(mock_test: &MockTest, output_path: &Path) -> ExtractResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, to_json_string(mock_test)?)?;

    info!("已导出: {}", output_path.display());
    info!("  题目数: {}", mock_test.total_questions);
    info!("  科目: {}", mock_test.subject);
    info!("  时长: {} 分钟", mock_test.time_limit_minutes);
    Ok(())
}

pub fn load_from_json(path: &Path) -> ExtractResult<MockTest> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
