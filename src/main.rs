use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use mcq_extract::config::{AppConfig, LocaleConfig};
use mcq_extract::extractor::{ExtractionPipeline, TestInfo};
use mcq_extract::storage::export_to_json;
use mcq_extract::utils::logger;

#[derive(Parser)]
#[command(name = "mcq-extract")]
#[command(about = "从模拟试卷 PDF 中提取选择题并导出 JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成默认配置文件
    Init,
    /// 提取题目并导出为 JSON
    Extract {
        /// 输入文件（PDF 或文本）
        input: PathBuf,
        /// 输出 JSON 路径
        output: PathBuf,
        /// 科目名称
        #[arg(short, long)]
        subject: Option<String>,
        /// 试卷名称（主语言）
        #[arg(short = 'n', long)]
        test_name: Option<String>,
        /// 试卷名称（第二语言）
        #[arg(long)]
        title_secondary: Option<String>,
        /// 考试时长（分钟）
        #[arg(short, long)]
        time: Option<u32>,
    },
}

fn main() -> ExitCode {
    // 初始化日志
    logger::init_logger();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => init_command().map(|_| true),
        Commands::Extract {
            input,
            output,
            subject,
            test_name,
            title_secondary,
            time,
        } => extract_command(&input, &output, subject, test_name, title_secondary, time),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_command() -> Result<()> {
    info!("初始化配置...");
    std::fs::create_dir_all("config")?;

    AppConfig::default().save("config/settings.toml")?;
    info!("已生成配置文件: config/settings.toml");

    std::fs::write("config/locales.toml", LocaleConfig::default().to_toml()?)?;
    info!("已生成语言配置: config/locales.toml");

    info!("✅ 初始化完成");
    Ok(())
}

/// 返回 false 表示没有识别到任何题目
fn extract_command(
    input: &Path,
    output: &Path,
    subject: Option<String>,
    test_name: Option<String>,
    title_secondary: Option<String>,
    time: Option<u32>,
) -> Result<bool> {
    let app_config = AppConfig::load().context("加载 config/settings.toml 失败")?;
    let locales = LocaleConfig::load().context("加载 config/locales.toml 失败")?;
    let pipeline = ExtractionPipeline::new(app_config, &locales)?;

    let questions = pipeline
        .process(input)
        .with_context(|| format!("无法读取输入: {}", input.display()))?;

    if questions.is_empty() {
        error!("❌ 未在 {} 中找到任何题目", input.display());
        return Ok(false);
    }

    let defaults = &pipeline.config().extractor;
    let info = TestInfo {
        title_en: test_name.unwrap_or_else(|| defaults.test_name.clone()),
        title_hi: title_secondary,
        subject: subject.unwrap_or_else(|| defaults.subject.clone()),
        time_limit_minutes: time.unwrap_or(defaults.time_limit_minutes),
    };
    let mock_test = pipeline.build_mock_test(questions, info);

    export_to_json(&mock_test, output)
        .with_context(|| format!("写入 {} 失败", output.display()))?;

    info!("✅ 提取完成: {} 道题目, 难度 {}", mock_test.total_questions, mock_test.difficulty);
    Ok(true)
}
