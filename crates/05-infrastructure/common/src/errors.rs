//! 错误类型定义

use crate::metadata::{ElementRef, FqName};
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// 代码生成错误类型
///
/// 注解校验和作用域分组产生的错误都指向具体的源元素，
/// 只终止该元素所属类的生成，不影响同一轮中的其他类。
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{element}: {marker} 注解只能用于同时标注了 {required} 的元素")]
    MissingRequiredCompanionAnnotation {
        element: ElementRef,
        marker: String,
        required: String,
    },

    #[error("{element}: 绑定类型 {bound_type} 不是 {member_type} 的父类型")]
    InvalidBoundType {
        element: ElementRef,
        bound_type: FqName,
        member_type: FqName,
    },

    #[error("{element}: 没有可用的默认作用域，且注解未显式声明作用域")]
    UnresolvedScope { element: ElementRef },

    #[error("{element}: 未显式声明作用域，而所在模块贡献到多个作用域: {}", format_scopes(.scopes))]
    AmbiguousScopeSource {
        element: ElementRef,
        scopes: Vec<FqName>,
    },

    #[error("{element}: 注解 {annotation} 无效: {message}")]
    MalformedAnnotation {
        element: ElementRef,
        annotation: FqName,
        message: String,
    },

    #[error("生成文件写入失败: {file}, 原因: {source}")]
    ArtifactWrite {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("生成任务执行失败: {message}")]
    TaskFailed { message: String },
}

impl GenerationError {
    /// 出错的源元素（与注解用法无关的错误返回 `None`）
    pub fn element(&self) -> Option<&ElementRef> {
        match self {
            Self::MissingRequiredCompanionAnnotation { element, .. }
            | Self::InvalidBoundType { element, .. }
            | Self::UnresolvedScope { element }
            | Self::AmbiguousScopeSource { element, .. }
            | Self::MalformedAnnotation { element, .. } => Some(element),
            Self::ArtifactWrite { .. } | Self::TaskFailed { .. } => None,
        }
    }

    /// 创建注解无效错误
    pub fn malformed(
        element: ElementRef,
        annotation: &FqName,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedAnnotation {
            element,
            annotation: annotation.clone(),
            message: message.into(),
        }
    }
}

fn format_scopes(scopes: &[FqName]) -> String {
    scopes
        .iter()
        .map(FqName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type GenerationResult<T> = Result<T, GenerationError>;
