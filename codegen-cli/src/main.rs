//! # 代码生成命令行
//!
//! 读取宿主前端导出的声明语料，运行全部生成器并把生成文件写到输出目录。
//! 存在任何诊断时以状态码 1 退出。

use anyhow::Context;
use clap::Parser;
use codegen_composition::{
    CorpusLoader, FileSystemArtifactWriter, GenerationPipelineBuilder, LoggingConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "codegen")]
#[command(about = "依赖注入装配代码生成器")]
struct Args {
    /// 声明语料（JSON）路径
    #[arg(short = 'i', long)]
    corpus: PathBuf,

    /// 生成文件输出目录
    #[arg(short, long, default_value = "build/generated/codegen")]
    output: PathBuf,

    /// 生成器配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 只检查，不写出文件
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let logging = if args.json_logs {
        LoggingConfig::ci()
    } else {
        LoggingConfig::default()
    }
    .with_level(parse_log_level(&args.log_level));

    let mut builder = GenerationPipelineBuilder::new().with_logging(logging);
    if let Some(config) = &args.config {
        builder = builder.with_config_file(config);
    }
    let pipeline = builder.build().context("构建生成流程失败")?;

    let unit = CorpusLoader::load_file(&args.corpus)
        .await
        .with_context(|| format!("无法加载声明语料 {}", args.corpus.display()))?;

    let report = if args.dry_run {
        pipeline.run(unit).await?
    } else {
        let writer = FileSystemArtifactWriter::new(&args.output)
            .with_extension(pipeline.settings().file_extension.clone());
        pipeline.run_and_write(unit, &writer).await?
    };

    for diagnostic in &report.diagnostics {
        match &diagnostic.element {
            Some(element) => error!(element = %element, "[{}] {}", diagnostic.generator, diagnostic.message),
            None => error!("[{}] {}", diagnostic.generator, diagnostic.message),
        }
    }

    info!(
        "生成文件 {} 个，写出 {} 个，诊断 {} 条",
        report.files.len(),
        report.written.len(),
        report.diagnostics.len()
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
