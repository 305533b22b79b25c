//! 单元测试共用的声明构造函数

use crate::DeclaredTypeHierarchy;
use codegen_abstractions::{AnnotationSchema, GenerationContext};
use codegen_common::{names, AnnotationInstance, AnnotationValue, CompilationUnit, FqName};
use std::sync::Arc;

pub(crate) fn class_value(name: &str) -> AnnotationValue {
    AnnotationValue::Class(FqName::new(name))
}

pub(crate) fn module() -> AnnotationInstance {
    AnnotationInstance::new(names::DAGGER_MODULE.clone())
}

pub(crate) fn provides() -> AnnotationInstance {
    AnnotationInstance::new(names::DAGGER_PROVIDES.clone())
}

pub(crate) fn binds() -> AnnotationInstance {
    AnnotationInstance::new(names::DAGGER_BINDS.clone())
}

pub(crate) fn contributes_to(scope: &str) -> AnnotationInstance {
    AnnotationInstance::new(names::CONTRIBUTES_TO.clone()).with_positional(class_value(scope))
}

pub(crate) fn provides_binding(bound_type: &str) -> AnnotationInstance {
    AnnotationInstance::new(AnnotationSchema::default().provides_binding)
        .with_positional(class_value(bound_type))
}

pub(crate) fn contribution(scope: Option<&str>, name: Option<&str>) -> AnnotationInstance {
    let mut annotation = AnnotationInstance::new(AnnotationSchema::default().contribution);
    if let Some(scope) = scope {
        annotation = annotation.with_named("scope", class_value(scope));
    }
    if let Some(name) = name {
        annotation = annotation.with_named("name", AnnotationValue::String(name.to_string()));
    }
    annotation
}

pub(crate) fn auto_wire(scope: &str) -> AnnotationInstance {
    AnnotationInstance::new(AnnotationSchema::default().auto_wire)
        .with_positional(class_value(scope))
}

pub(crate) fn named(value: &str) -> AnnotationInstance {
    AnnotationInstance::new("javax.inject.Named")
        .with_positional(AnnotationValue::String(value.to_string()))
        .with_meta_annotation("javax.inject.Qualifier")
}

pub(crate) fn context(unit: &CompilationUnit) -> GenerationContext {
    GenerationContext::new(Arc::new(DeclaredTypeHierarchy::from_unit(unit)))
}
