//! 设置加载器实现
//!
//! 按 默认值 → 配置文件 → 环境变量 的顺序叠加设置来源。

use crate::settings::GeneratorSettings;
use crate::validation::SettingsValidator;
use codegen_common::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 默认的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "CODEGEN";

/// 设置加载器
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// 配置文件路径（可选）
    file: Option<PathBuf>,
    /// 环境变量前缀
    env_prefix: String,
    /// 是否读取环境变量
    use_environment: bool,
}

impl SettingsLoader {
    /// 创建新的设置加载器
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            use_environment: true,
        }
    }

    /// 指定配置文件
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 设置是否读取环境变量
    pub fn with_environment(mut self, enabled: bool) -> Self {
        self.use_environment = enabled;
        self
    }

    /// 加载并验证设置
    pub fn load(&self) -> ConfigResult<GeneratorSettings> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            info!("加载生成器配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }

        if self.use_environment {
            debug!("读取环境变量配置，前缀: {}", self.env_prefix);
            builder = builder.add_source(
                config::Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: GeneratorSettings = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                error!("生成器配置解析失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        SettingsValidator::new().validate(&settings)?;

        debug!("生成器配置加载完成: {:?}", settings);
        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
