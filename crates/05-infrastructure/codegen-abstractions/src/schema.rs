//! 标记注解词汇表
//!
//! 三种标记注解的全限定名、参数约定以及限定符分类规则。
//! 标记注解一经发现即被转换为封闭的 [`MarkerAnnotation`] 枚举，
//! 后续的校验和提取都只对这个枚举做模式匹配。

use codegen_common::{
    names, AnnotationInstance, ElementRef, FqName, GenerationError, GenerationResult,
};
use serde::{Deserialize, Serialize};

/// 标记注解种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// 把提供者的返回值绑定到父类型
    ProvidesBinding,
    /// 把声明或类型发布到某个作用域的对象图中
    Contribution,
    /// 为类型自动生成成员注入
    AutoWire,
}

impl MarkerKind {
    /// 显示名称
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ProvidesBinding => "ProvidesBinding",
            Self::Contribution => "Contribution",
            Self::AutoWire => "AutoWire",
        }
    }
}

/// 解析后的标记注解
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerAnnotation {
    /// `ProvidesBinding(boundType)`
    ProvidesBinding {
        /// 绑定到的父类型
        bound_type: FqName,
    },
    /// `Contribution(scope = <none>, name = "")`
    Contribution {
        /// 显式作用域，使用默认哨兵时为空
        scope: Option<FqName>,
        /// 显式名称，空字符串时为空
        name: Option<String>,
    },
    /// `AutoWire(scope)`
    AutoWire {
        /// 目标作用域
        scope: FqName,
    },
}

impl MarkerAnnotation {
    /// 标记种类
    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::ProvidesBinding { .. } => MarkerKind::ProvidesBinding,
            Self::Contribution { .. } => MarkerKind::Contribution,
            Self::AutoWire { .. } => MarkerKind::AutoWire,
        }
    }
}

/// 标记注解词汇表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSchema {
    /// `ProvidesBinding` 注解的全限定名
    pub provides_binding: FqName,
    /// `Contribution` 注解的全限定名
    pub contribution: FqName,
    /// `AutoWire` 注解的全限定名
    pub auto_wire: FqName,
    /// 表示“未指定作用域”的哨兵类型
    pub scope_sentinel: FqName,
    /// 限定符注解类型上携带的元注解
    pub qualifier_meta_annotations: Vec<FqName>,
}

impl Default for AnnotationSchema {
    fn default() -> Self {
        Self {
            provides_binding: FqName::new("lorn.codegen.annotations.ProvidesBinding"),
            contribution: FqName::new("lorn.codegen.annotations.Contribution"),
            auto_wire: FqName::new("lorn.codegen.annotations.AutoWire"),
            scope_sentinel: names::KOTLIN_UNIT.clone(),
            qualifier_meta_annotations: vec![
                FqName::new("javax.inject.Qualifier"),
                FqName::new("jakarta.inject.Qualifier"),
            ],
        }
    }
}

impl AnnotationSchema {
    /// 标记种类对应的注解全限定名
    pub fn marker_name(&self, kind: MarkerKind) -> &FqName {
        match kind {
            MarkerKind::ProvidesBinding => &self.provides_binding,
            MarkerKind::Contribution => &self.contribution,
            MarkerKind::AutoWire => &self.auto_wire,
        }
    }

    /// 判断注解是否为标记注解
    pub fn marker_kind(&self, annotation: &AnnotationInstance) -> Option<MarkerKind> {
        [
            MarkerKind::ProvidesBinding,
            MarkerKind::Contribution,
            MarkerKind::AutoWire,
        ]
        .into_iter()
        .find(|kind| self.marker_name(*kind) == &annotation.fq_name)
    }

    /// 把注解实例解析为标记注解，非标记注解返回 `Ok(None)`
    pub fn parse_marker(
        &self,
        annotation: &AnnotationInstance,
        element: &ElementRef,
    ) -> GenerationResult<Option<MarkerAnnotation>> {
        let Some(kind) = self.marker_kind(annotation) else {
            return Ok(None);
        };

        let marker = match kind {
            MarkerKind::ProvidesBinding => MarkerAnnotation::ProvidesBinding {
                bound_type: required_class(annotation, "boundType", 0, element)?,
            },
            MarkerKind::Contribution => MarkerAnnotation::Contribution {
                scope: annotation
                    .class_argument_at("scope", 0)
                    .filter(|scope| *scope != &self.scope_sentinel)
                    .cloned(),
                name: annotation
                    .string_argument_at("name", 1)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            },
            MarkerKind::AutoWire => MarkerAnnotation::AutoWire {
                scope: required_class(annotation, "scope", 0, element)?,
            },
        };

        Ok(Some(marker))
    }

    /// 按源码顺序解析给定种类的全部标记注解（标记注解可重复）
    pub fn markers(
        &self,
        annotations: &[AnnotationInstance],
        kind: MarkerKind,
        element: &ElementRef,
    ) -> GenerationResult<Vec<MarkerAnnotation>> {
        let fq_name = self.marker_name(kind);
        let mut markers = Vec::new();
        for annotation in annotations.iter().filter(|a| &a.fq_name == fq_name) {
            if let Some(marker) = self.parse_marker(annotation, element)? {
                markers.push(marker);
            }
        }
        Ok(markers)
    }

    /// 是否为限定符注解
    pub fn is_qualifier(&self, annotation: &AnnotationInstance) -> bool {
        annotation.has_meta_annotation(&self.qualifier_meta_annotations)
    }

    /// 按源码顺序挑出限定符注解
    pub fn qualifiers(&self, annotations: &[AnnotationInstance]) -> Vec<AnnotationInstance> {
        annotations
            .iter()
            .filter(|annotation| self.is_qualifier(annotation))
            .cloned()
            .collect()
    }
}

/// 读取 `@ContributesTo` 注解声明的作用域
pub fn contributed_scopes(
    annotations: &[AnnotationInstance],
    element: &ElementRef,
) -> GenerationResult<Vec<FqName>> {
    annotations
        .iter()
        .filter(|annotation| annotation.fq_name == *names::CONTRIBUTES_TO)
        .map(|annotation| required_class(annotation, "scope", 0, element))
        .collect()
}

fn required_class(
    annotation: &AnnotationInstance,
    name: &str,
    index: usize,
    element: &ElementRef,
) -> GenerationResult<FqName> {
    annotation
        .class_argument_at(name, index)
        .cloned()
        .ok_or_else(|| {
            GenerationError::malformed(
                element.clone(),
                &annotation.fq_name,
                format!("缺少类字面量参数 `{name}`"),
            )
        })
}
