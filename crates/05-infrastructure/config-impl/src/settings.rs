//! 生成器设置

use codegen_abstractions::{
    AnnotationSchema, GeneratedNames, GenerationContext, ScopeFanOut, TypeHierarchy,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 各生成器的开关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorToggles {
    /// 绑定到父类型
    pub bindings: bool,
    /// 发布到作用域
    pub provisions: bool,
    /// 自动成员注入
    pub auto_wire: bool,
}

impl Default for GeneratorToggles {
    fn default() -> Self {
        Self {
            bindings: true,
            provisions: true,
            auto_wire: true,
        }
    }
}

impl GeneratorToggles {
    /// 按生成器名称查询开关，未知名称视为启用
    pub fn is_enabled(&self, generator: &str) -> bool {
        match generator {
            "bindings" => self.bindings,
            "provisions" => self.provisions,
            "auto_wire" => self.auto_wire,
            _ => true,
        }
    }
}

/// 生成器设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 宿主只要求生成工厂代码
    pub generate_factories_only: bool,
    /// 标记注解词汇表
    pub schema: AnnotationSchema,
    /// 合成声明名称
    pub names: GeneratedNames,
    /// 作用域继承策略
    pub scope_fan_out: ScopeFanOut,
    /// 并发处理所属类的任务上限
    pub max_concurrent_tasks: usize,
    /// 生成文件扩展名
    pub file_extension: String,
    /// 生成器开关
    pub generators: GeneratorToggles,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            generate_factories_only: false,
            schema: AnnotationSchema::default(),
            names: GeneratedNames::default(),
            scope_fan_out: ScopeFanOut::default(),
            max_concurrent_tasks: 8,
            file_extension: "kt".to_string(),
            generators: GeneratorToggles::default(),
        }
    }
}

impl GeneratorSettings {
    /// 基于当前设置创建生成上下文
    pub fn to_context(&self, hierarchy: Arc<dyn TypeHierarchy>) -> GenerationContext {
        GenerationContext::new(hierarchy)
            .with_schema(self.schema.clone())
            .with_names(self.names.clone())
            .with_scope_fan_out(self.scope_fan_out)
            .with_generate_factories_only(self.generate_factories_only)
    }
}
