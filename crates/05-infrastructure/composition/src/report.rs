//! 生成结果汇总

use codegen_abstractions::GeneratedFile;
use codegen_common::{ElementRef, GenerationError};
use std::fmt;
use std::path::PathBuf;

/// 一条诊断信息，指向出错的源元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 产生诊断的生成器
    pub generator: String,
    /// 出错的源元素
    pub element: Option<ElementRef>,
    /// 诊断消息
    pub message: String,
}

impl Diagnostic {
    /// 从生成错误创建诊断，错误未指明元素时使用 `fallback`
    pub fn from_error(
        generator: impl Into<String>,
        error: &GenerationError,
        fallback: Option<ElementRef>,
    ) -> Self {
        Self {
            generator: generator.into(),
            element: error.element().cloned().or(fallback),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.generator, self.message)
    }
}

/// 一轮生成的结果
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// 生成的文件，按 (包名, 文件名) 排序
    pub files: Vec<GeneratedFile>,
    /// 诊断信息
    pub diagnostics: Vec<Diagnostic>,
    /// 已写出的路径
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    /// 没有任何诊断
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按文件名查找生成文件
    pub fn file(&self, file_name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.file_name == file_name)
    }

    /// 指向给定元素的诊断
    pub fn diagnostics_for<'a>(
        &'a self,
        element: &'a ElementRef,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.element.as_ref() == Some(element))
    }
}
