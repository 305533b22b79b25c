//! # Codegen Configuration
//!
//! 代码生成器的配置实现：设置模型、加载和验证。
//!
//! ## 主要组件
//!
//! - [`GeneratorSettings`] - 生成器设置
//! - [`SettingsLoader`] - 基于 `config` crate 的设置加载器（默认值 → 文件 → 环境变量）
//! - [`SettingsValidator`] - 设置验证器

pub mod binder;
pub mod settings;
pub mod validation;

pub use binder::*;
pub use settings::*;
pub use validation::*;
