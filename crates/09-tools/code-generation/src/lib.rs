//! # Code Generation
//!
//! 依赖注入装配代码生成器的核心流程：扫描 → 校验与提取 → 分组与合成。
//!
//! ## 生成器
//!
//! - [`BindingsCodeGenerator`] - 把提供者绑定到声明的父类型
//! - [`ProvisionsCodeGenerator`] - 把提供的值发布到作用域组件
//! - [`AutoWireCodeGenerator`] - 为注入目标生成成员注入模块和组件
//!
//! ## 使用示例
//!
//! ```rust
//! use code_generation::{default_generators, DeclaredTypeHierarchy};
//! use codegen_abstractions::{CodeGenerator, GenerationContext};
//! use codegen_common::CompilationUnit;
//! use std::sync::Arc;
//!
//! let unit = CompilationUnit::new("app");
//! let context = GenerationContext::new(Arc::new(DeclaredTypeHierarchy::from_unit(&unit)));
//!
//! for generator in default_generators() {
//!     assert!(generator.generate(&unit, &context).is_empty());
//! }
//! ```

pub mod extractor;
pub mod generators;
pub mod grouping;
pub mod hierarchy;
pub mod poet;
pub mod scanner;
pub mod synthesizer;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use extractor::{BindingRecord, ProvisionRecord};
pub use generators::*;
pub use grouping::{group, ScopeGroups};
pub use hierarchy::DeclaredTypeHierarchy;
pub use scanner::{AnnotatedMember, MemberKind};
