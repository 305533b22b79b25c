//! 声明语料加载

use crate::errors::PipelineError;
use codegen_common::CompilationUnit;
use std::path::Path;
use tracing::{debug, info};

/// 从 JSON 加载宿主前端导出的编译单元
#[derive(Debug, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    /// 读取 JSON 文件
    pub async fn load_file<P: AsRef<Path>>(path: P) -> Result<CompilationUnit, PipelineError> {
        let path = path.as_ref();
        info!("加载声明语料: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::CorpusRead {
                path: path.display().to_string(),
                source,
            })?;

        Self::parse(&content).map_err(|source| PipelineError::CorpusParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 解析 JSON 文本
    pub fn parse(content: &str) -> Result<CompilationUnit, serde_json::Error> {
        let unit: CompilationUnit = serde_json::from_str(content)?;
        debug!(
            "声明语料 {} 包含 {} 个顶层类",
            unit.module_name,
            unit.classes.len()
        );
        Ok(unit)
    }
}
