//! 生成文件写出器

use async_trait::async_trait;
use codegen_abstractions::{ArtifactWriter, GeneratedFile};
use codegen_common::{GenerationError, GenerationResult};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_EXTENSION: &str = "kt";

/// 写入 `<根目录>/<包路径>/<文件名>.<扩展名>`
#[derive(Debug, Clone)]
pub struct FileSystemArtifactWriter {
    root: PathBuf,
    extension: String,
}

impl FileSystemArtifactWriter {
    /// 创建写出器
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// 设置文件扩展名
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// 输出根目录
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactWriter for FileSystemArtifactWriter {
    async fn write(&self, file: &GeneratedFile) -> GenerationResult<PathBuf> {
        let path = self.root.join(file.relative_path(&self.extension));
        let write_error = |source| GenerationError::ArtifactWrite {
            file: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_error)?;
        }
        tokio::fs::write(&path, file.content.as_bytes())
            .await
            .map_err(write_error)?;

        debug!("写出生成文件: {}", path.display());
        Ok(path)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

/// 把生成文件保存在内存中
#[derive(Debug, Default)]
pub struct InMemoryArtifactWriter {
    files: Mutex<Vec<GeneratedFile>>,
}

impl InMemoryArtifactWriter {
    /// 创建写出器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写出文件的快照
    pub fn files(&self) -> Vec<GeneratedFile> {
        self.files.lock().clone()
    }

    /// 已写出文件数量
    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    /// 是否尚未写出任何文件
    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

#[async_trait]
impl ArtifactWriter for InMemoryArtifactWriter {
    async fn write(&self, file: &GeneratedFile) -> GenerationResult<PathBuf> {
        self.files.lock().push(file.clone());
        Ok(file.relative_path(DEFAULT_EXTENSION))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
