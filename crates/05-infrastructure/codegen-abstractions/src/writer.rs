//! 生成文件及宿主写出接口

use async_trait::async_trait;
use codegen_common::{GenerationResult, NamingConventions};
use std::path::PathBuf;

/// 生成的源文件
///
/// 每次驱动调用为每个符合条件的所属类创建一次，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// 包名
    pub package: String,
    /// 文件名（不含扩展名）
    pub file_name: String,
    /// 文件内容
    pub content: String,
    /// 文件中声明的接口名称
    pub declarations: Vec<String>,
}

impl GeneratedFile {
    /// 相对于输出根目录的路径
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = NamingConventions::package_path_segments(&self.package)
            .into_iter()
            .collect();
        path.push(format!("{}.{}", self.file_name, extension));
        path
    }

    /// 排序键：包名加文件名
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.package, &self.file_name)
    }
}

/// 宿主提供的生成文件登记设施
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    /// 写出一个生成文件，返回写出位置
    async fn write(&self, file: &GeneratedFile) -> GenerationResult<PathBuf>;

    /// 写出器名称
    fn name(&self) -> &str;
}
