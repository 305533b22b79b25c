//! # Codegen Common
//!
//! 这个 crate 提供了依赖注入装配代码生成器各层共享的模型、约定和错误类型。
//!
//! ## 核心组件
//!
//! - [`FqName`] / [`TypeRef`] - 全限定名与类型引用
//! - [`AnnotationInstance`] - 声明上附带的注解实例
//! - [`ClassDeclaration`] / [`CompilationUnit`] - 宿主编译器提供的声明语料
//! - [`NamingConventions`] - 生成声明的命名约定
//! - [`GenerationError`] - 生成过程中的错误
//!
//! ## 设计原则
//!
//! - 所有模型均为不可变值对象
//! - 声明语料可通过 serde 从宿主序列化结果中加载
//! - 失败即关闭：非法的注解用法阻止代码生成

pub mod conventions;
pub mod declarations;
pub mod errors;
pub mod metadata;
pub mod names;

pub use conventions::*;
pub use declarations::*;
pub use errors::*;
pub use metadata::*;
