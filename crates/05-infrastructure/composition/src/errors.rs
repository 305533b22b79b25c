//! 生成流程错误类型

use codegen_common::{ConfigError, GenerationError};
use thiserror::Error;

/// 生成流程错误
///
/// 只包含让整轮生成无法开始或无法继续的错误；单个所属类的失败记录在
/// [`GenerationReport`](crate::GenerationReport) 的诊断信息中。
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("生成器配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("读取声明语料失败: {path}, 原因: {source}")]
    CorpusRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("解析声明语料失败: {path}, 原因: {source}")]
    CorpusParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("生成失败: {0}")]
    Generation(#[from] GenerationError),

    #[error("日志初始化失败: {message}")]
    Logging { message: String },
}
