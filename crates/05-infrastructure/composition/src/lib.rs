//! # 生成流程组合层
//!
//! 这个 crate 把设置、生成器和宿主协作接口组合成一条可运行的生成流程。
//!
//! ## 主要功能
//!
//! - **流程构建器**: 使用建造者模式组装设置、生成器和日志
//! - **并发执行**: 每个 (生成器, 所属类) 组合一个任务，失败互不影响
//! - **结果汇总**: 按包名和文件名排序的生成文件加诊断信息
//! - **文件写出**: 文件系统和内存两种写出器
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use codegen_composition::{CorpusLoader, FileSystemArtifactWriter, GenerationPipelineBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = GenerationPipelineBuilder::new()
//!         .with_config_file("codegen.toml")
//!         .build()?;
//!
//!     let unit = CorpusLoader::load_file("build/corpus.json").await?;
//!     let writer = FileSystemArtifactWriter::new("build/generated");
//!     let report = pipeline.run_and_write(unit, &writer).await?;
//!
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod corpus;
pub mod errors;
pub mod pipeline;
pub mod report;
pub mod writers;


pub use builder::{GenerationPipelineBuilder, LoggingConfig};
pub use corpus::CorpusLoader;
pub use errors::PipelineError;
pub use pipeline::GenerationPipeline;
pub use report::{Diagnostic, GenerationReport};
pub use writers::{FileSystemArtifactWriter, InMemoryArtifactWriter};
