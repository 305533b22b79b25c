//! # Codegen Abstractions
//!
//! 代码生成器的抽象层，定义标记注解词汇表以及与宿主构建框架交互的接口。
//!
//! ## 核心接口
//!
//! - [`AnnotationSchema`] - 标记注解词汇表和限定符分类
//! - [`TypeHierarchy`] - 宿主提供的父类型查询
//! - [`ArtifactWriter`] - 宿主提供的生成文件登记设施
//! - [`CodeGenerator`] - 生成器驱动接口

pub mod generator;
pub mod hierarchy;
pub mod schema;
pub mod writer;

pub use generator::*;
pub use hierarchy::*;
pub use schema::*;
pub use writer::*;
