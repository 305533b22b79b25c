//! 生成流程构建器

use crate::errors::PipelineError;
use crate::pipeline::GenerationPipeline;
use code_generation::default_generators;
use codegen_abstractions::{CodeGenerator, TypeHierarchy};
use codegen_config::{GeneratorSettings, SettingsLoader, SettingsValidator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 生成流程构建器
///
/// 使用建造者模式组装设置、生成器和日志
pub struct GenerationPipelineBuilder {
    /// 直接给定的设置
    settings: Option<GeneratorSettings>,
    /// 配置文件路径
    config_file: Option<PathBuf>,
    /// 环境变量前缀
    env_prefix: Option<String>,
    /// 是否读取环境变量
    environment_enabled: bool,
    /// 额外注册的生成器
    extra_generators: Vec<Arc<dyn CodeGenerator>>,
    /// 是否注册内置生成器
    builtin_generators: bool,
    /// 宿主提供的类型层次
    hierarchy: Option<Arc<dyn TypeHierarchy>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl GenerationPipelineBuilder {
    /// 创建新的生成流程构建器
    pub fn new() -> Self {
        Self {
            settings: None,
            config_file: None,
            env_prefix: None,
            environment_enabled: true,
            extra_generators: Vec::new(),
            builtin_generators: true,
            hierarchy: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 直接使用给定设置，不再读取配置文件和环境变量
    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// 从配置文件加载设置
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        info!("使用生成器配置文件: {}", path.display());
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 启用或禁用环境变量配置源
    pub fn enable_environment(mut self, enabled: bool) -> Self {
        self.environment_enabled = enabled;
        self
    }

    /// 注册额外的生成器，排在内置生成器之后
    pub fn add_generator<T: CodeGenerator + 'static>(mut self, generator: T) -> Self {
        debug!("添加生成器: {}", generator.name());
        self.extra_generators.push(Arc::new(generator));
        self
    }

    /// 不注册内置生成器
    pub fn without_builtin_generators(mut self) -> Self {
        self.builtin_generators = false;
        self
    }

    /// 使用宿主提供的类型层次
    pub fn with_hierarchy<T: TypeHierarchy + 'static>(mut self, hierarchy: T) -> Self {
        self.hierarchy = Some(Arc::new(hierarchy));
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建生成流程
    pub fn build(self) -> Result<GenerationPipeline, PipelineError> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        info!("开始构建生成流程");

        let settings = match &self.settings {
            Some(settings) => {
                SettingsValidator::new().validate(settings)?;
                settings.clone()
            }
            None => self.load_settings()?,
        };

        let mut generators: Vec<Arc<dyn CodeGenerator>> = Vec::new();
        if self.builtin_generators {
            generators.extend(
                default_generators()
                    .into_iter()
                    .filter(|generator| settings.generators.is_enabled(generator.name())),
            );
        }
        generators.extend(self.extra_generators);

        let pipeline = GenerationPipeline::new(settings, generators, self.hierarchy);
        info!("生成流程构建完成: {:?}", pipeline.generator_names());
        Ok(pipeline)
    }

    fn load_settings(&self) -> Result<GeneratorSettings, PipelineError> {
        let mut loader = SettingsLoader::new().with_environment(self.environment_enabled);
        if let Some(path) = &self.config_file {
            loader = loader.with_file(path);
        }
        if let Some(prefix) = &self.env_prefix {
            loader = loader.with_env_prefix(prefix.clone());
        }
        Ok(loader.load()?)
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> Result<(), PipelineError> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| PipelineError::Logging {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for GenerationPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建构建服务器日志配置
    pub fn ci() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }
}
