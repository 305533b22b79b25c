//! 生成器驱动接口
//!
//! 每个生成器负责一种标记注解：挑出所属类，然后对每个所属类独立地执行
//! 扫描、校验、提取、分组和合成。所属类之间没有共享的可变状态，
//! 因此调用方可以把 [`CodeGenerator::generate_for_class`] 并发地分发到多个任务上。

use crate::hierarchy::TypeHierarchy;
use crate::schema::AnnotationSchema;
use crate::writer::GeneratedFile;
use codegen_common::{ClassDeclaration, CompilationUnit, FqName, GenerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 未显式声明作用域的记录如何继承所在模块的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFanOut {
    /// 发布到所在模块贡献的每一个作用域
    #[default]
    FanOut,
    /// 所在模块贡献到多个作用域时报错
    RequireSingle,
}

/// 合成声明的名称后缀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedNames {
    /// 绑定到父类型的生成接口后缀
    pub and_binds_suffix: String,
    /// 发布到作用域的生成接口后缀
    pub provisions_suffix: String,
    /// 自动成员注入的生成接口后缀
    pub auto_wire_suffix: String,
    /// 模块角色后缀
    pub module_suffix: String,
    /// 组件角色后缀
    pub component_suffix: String,
}

impl Default for GeneratedNames {
    fn default() -> Self {
        Self {
            and_binds_suffix: "AndBindsCodeGen".to_string(),
            provisions_suffix: "ProvisionsCodeGen".to_string(),
            auto_wire_suffix: "AICodeGen".to_string(),
            module_suffix: "Module".to_string(),
            component_suffix: "Component".to_string(),
        }
    }
}

/// 一次生成调用的上下文
#[derive(Clone)]
pub struct GenerationContext {
    /// 标记注解词汇表
    pub schema: AnnotationSchema,
    /// 合成名称
    pub names: GeneratedNames,
    /// 作用域继承策略
    pub scope_fan_out: ScopeFanOut,
    /// 宿主只要求生成工厂代码时跳过本生成器
    pub generate_factories_only: bool,
    /// 类型层次查询
    pub hierarchy: Arc<dyn TypeHierarchy>,
}

impl GenerationContext {
    /// 使用默认词汇表和名称创建上下文
    pub fn new(hierarchy: Arc<dyn TypeHierarchy>) -> Self {
        Self {
            schema: AnnotationSchema::default(),
            names: GeneratedNames::default(),
            scope_fan_out: ScopeFanOut::default(),
            generate_factories_only: false,
            hierarchy,
        }
    }

    /// 设置词汇表
    pub fn with_schema(mut self, schema: AnnotationSchema) -> Self {
        self.schema = schema;
        self
    }

    /// 设置合成名称
    pub fn with_names(mut self, names: GeneratedNames) -> Self {
        self.names = names;
        self
    }

    /// 设置作用域继承策略
    pub fn with_scope_fan_out(mut self, scope_fan_out: ScopeFanOut) -> Self {
        self.scope_fan_out = scope_fan_out;
        self
    }

    /// 设置是否只生成工厂
    pub fn with_generate_factories_only(mut self, enabled: bool) -> Self {
        self.generate_factories_only = enabled;
        self
    }
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("schema", &self.schema)
            .field("names", &self.names)
            .field("scope_fan_out", &self.scope_fan_out)
            .field("generate_factories_only", &self.generate_factories_only)
            .field("hierarchy", &"<dyn TypeHierarchy>")
            .finish()
    }
}

/// 单个所属类的生成结果
#[derive(Debug)]
pub struct ClassOutcome {
    /// 生成器名称
    pub generator: String,
    /// 所属类
    pub class: FqName,
    /// 生成的文件；没有可提取记录时为 `None`
    pub result: GenerationResult<Option<GeneratedFile>>,
}

/// 生成器驱动 trait
pub trait CodeGenerator: Send + Sync {
    /// 生成器名称
    fn name(&self) -> &str;

    /// 在当前上下文中是否需要运行
    fn is_applicable(&self, context: &GenerationContext) -> bool {
        !context.generate_factories_only
    }

    /// 挑出需要处理的所属类，保持声明顺序
    fn owning_classes<'a>(
        &self,
        unit: &'a CompilationUnit,
        context: &GenerationContext,
    ) -> Vec<&'a ClassDeclaration>;

    /// 处理一个所属类
    fn generate_for_class(
        &self,
        class: &ClassDeclaration,
        context: &GenerationContext,
    ) -> GenerationResult<Option<GeneratedFile>>;

    /// 顺序处理整个编译单元
    fn generate(&self, unit: &CompilationUnit, context: &GenerationContext) -> Vec<ClassOutcome> {
        if !self.is_applicable(context) {
            debug!("生成器 {} 不适用于当前上下文，跳过", self.name());
            return Vec::new();
        }

        self.owning_classes(unit, context)
            .into_iter()
            .map(|class| ClassOutcome {
                generator: self.name().to_string(),
                class: class.fq_name.clone(),
                result: self.generate_for_class(class, context),
            })
            .collect()
    }
}
