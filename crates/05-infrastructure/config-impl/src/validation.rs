//! 设置验证器实现

use crate::settings::GeneratorSettings;
use codegen_common::{is_valid_identifier, ConfigError, ConfigResult, FqName};
use tracing::{debug, warn};

/// 设置验证器
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    /// 创建新的设置验证器
    pub fn new() -> Self {
        Self
    }

    /// 验证设置，收集全部问题后一次性返回
    pub fn validate(&self, settings: &GeneratorSettings) -> ConfigResult<()> {
        let mut errors = Vec::new();

        let suffixes = [
            ("names.and_binds_suffix", &settings.names.and_binds_suffix),
            ("names.provisions_suffix", &settings.names.provisions_suffix),
            ("names.auto_wire_suffix", &settings.names.auto_wire_suffix),
            ("names.module_suffix", &settings.names.module_suffix),
            ("names.component_suffix", &settings.names.component_suffix),
        ];
        for (path, suffix) in suffixes {
            if !is_valid_identifier(suffix) {
                errors.push(format!("{path}: `{suffix}` 不是合法的标识符"));
            }
        }

        let schema = &settings.schema;
        let names = [
            ("schema.provides_binding", &schema.provides_binding),
            ("schema.contribution", &schema.contribution),
            ("schema.auto_wire", &schema.auto_wire),
            ("schema.scope_sentinel", &schema.scope_sentinel),
        ];
        for (path, name) in names {
            check_fq_name(path, name, &mut errors);
        }
        for name in &schema.qualifier_meta_annotations {
            check_fq_name("schema.qualifier_meta_annotations", name, &mut errors);
        }

        let markers = [&schema.provides_binding, &schema.contribution, &schema.auto_wire];
        if markers[0] == markers[1] || markers[0] == markers[2] || markers[1] == markers[2] {
            errors.push("schema: 三种标记注解的全限定名必须互不相同".to_string());
        }

        if settings.max_concurrent_tasks == 0 {
            errors.push("max_concurrent_tasks: 必须大于 0".to_string());
        }

        if settings.file_extension.is_empty()
            || !settings
                .file_extension
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric())
        {
            errors.push(format!(
                "file_extension: `{}` 不是合法的扩展名",
                settings.file_extension
            ));
        }

        if schema.qualifier_meta_annotations.is_empty() {
            warn!("未配置限定符元注解，所有限定符都不会被复制到生成声明中");
        }

        if errors.is_empty() {
            debug!("生成器设置验证通过");
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }
}

fn check_fq_name(path: &str, name: &FqName, errors: &mut Vec<String>) {
    if !name.is_valid() {
        errors.push(format!("{path}: `{name}` 不是合法的全限定名"));
    }
}
