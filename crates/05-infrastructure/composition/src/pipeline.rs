//! 并发生成流程
//!
//! 每个 (生成器, 所属类) 组合是一个独立任务。任务之间只共享只读的编译单元、
//! 生成上下文和生成器；结果收集后按固定顺序排序，并发度不影响输出。

use crate::errors::PipelineError;
use crate::report::{Diagnostic, GenerationReport};
use code_generation::DeclaredTypeHierarchy;
use codegen_abstractions::{ArtifactWriter, ClassOutcome, CodeGenerator, GenerationContext, TypeHierarchy};
use codegen_common::{ClassDeclaration, CompilationUnit, ElementRef, GenerationError};
use codegen_config::GeneratorSettings;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// 生成流程
pub struct GenerationPipeline {
    settings: GeneratorSettings,
    generators: Vec<Arc<dyn CodeGenerator>>,
    hierarchy: Option<Arc<dyn TypeHierarchy>>,
}

impl GenerationPipeline {
    pub(crate) fn new(
        settings: GeneratorSettings,
        generators: Vec<Arc<dyn CodeGenerator>>,
        hierarchy: Option<Arc<dyn TypeHierarchy>>,
    ) -> Self {
        Self {
            settings,
            generators,
            hierarchy,
        }
    }

    /// 当前设置
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// 已注册生成器的名称
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// 为编译单元创建生成上下文
    ///
    /// 没有注入类型层次时使用编译单元自身声明的父类型关系。
    pub fn context_for(&self, unit: &CompilationUnit) -> GenerationContext {
        let hierarchy = self
            .hierarchy
            .clone()
            .unwrap_or_else(|| Arc::new(DeclaredTypeHierarchy::from_unit(unit)));
        self.settings.to_context(hierarchy)
    }

    /// 运行全部生成器
    pub async fn run(&self, unit: CompilationUnit) -> Result<GenerationReport, PipelineError> {
        let context = Arc::new(self.context_for(&unit));
        let unit = Arc::new(unit);
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrent_tasks));
        let mut tasks: JoinSet<(usize, ClassOutcome)> = JoinSet::new();

        info!(
            "开始生成: 模块 {}，生成器 {} 个",
            unit.module_name,
            self.generators.len()
        );

        let classes = unit.class_paths();
        let positions: HashMap<usize, usize> = classes
            .iter()
            .enumerate()
            .map(|(position, (_, class))| (class_address(class), position))
            .collect();

        let mut report = GenerationReport::default();
        let mut ordinal = 0;
        for generator in &self.generators {
            if !generator.is_applicable(&context) {
                debug!("生成器 {} 不适用于当前上下文，跳过", generator.name());
                continue;
            }

            let mut owned = Vec::new();
            for owner in generator.owning_classes(&unit, &context) {
                match positions.get(&class_address(owner)) {
                    Some(&position) => owned.push(position),
                    None => {
                        warn!(
                            "生成器 {} 返回了不属于编译单元的类 {}，已忽略",
                            generator.name(),
                            owner.fq_name
                        );
                        let failure = GenerationError::TaskFailed {
                            message: format!("所属类 {} 不在编译单元中", owner.fq_name),
                        };
                        report.diagnostics.push(Diagnostic::from_error(
                            generator.name(),
                            &failure,
                            Some(ElementRef::class(owner.fq_name.clone())),
                        ));
                    }
                }
            }
            debug!("生成器 {} 找到 {} 个所属类", generator.name(), owned.len());

            for position in owned {
                let permit = semaphore.clone().acquire_owned().await.map_err(|e| {
                    GenerationError::TaskFailed {
                        message: format!("获取并发许可失败: {e}"),
                    }
                })?;
                let generator = Arc::clone(generator);
                let unit = Arc::clone(&unit);
                let context = Arc::clone(&context);
                let (path, class) = &classes[position];
                let path = path.clone();
                let class_name = class.fq_name.clone();
                let task_ordinal = ordinal;
                ordinal += 1;

                tasks.spawn_blocking(move || {
                    let _permit = permit;
                    let result = match unit.class_at(&path) {
                        Some(class) => generator.generate_for_class(class, &context),
                        None => Err(GenerationError::TaskFailed {
                            message: format!("无法定位所属类 {class_name}"),
                        }),
                    };
                    let outcome = ClassOutcome {
                        generator: generator.name().to_string(),
                        class: class_name,
                        result,
                    };
                    (task_ordinal, outcome)
                });
            }
        }

        let mut outcomes = Vec::with_capacity(ordinal);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!("生成任务异常终止: {}", e);
                    let failure = GenerationError::TaskFailed {
                        message: e.to_string(),
                    };
                    report
                        .diagnostics
                        .push(Diagnostic::from_error("pipeline", &failure, None));
                }
            }
        }
        outcomes.sort_by_key(|(task_ordinal, _)| *task_ordinal);

        for (_, outcome) in outcomes {
            match outcome.result {
                Ok(Some(file)) => report.files.push(file),
                Ok(None) => {}
                Err(e) => {
                    warn!("{} 处理 {} 失败: {}", outcome.generator, outcome.class, e);
                    report.diagnostics.push(Diagnostic::from_error(
                        outcome.generator,
                        &e,
                        Some(ElementRef::class(outcome.class)),
                    ));
                }
            }
        }
        report
            .files
            .sort_by(|left, right| left.sort_key().cmp(&right.sort_key()));

        info!(
            "生成完成: 文件 {} 个，诊断 {} 条",
            report.files.len(),
            report.diagnostics.len()
        );
        Ok(report)
    }

    /// 运行全部生成器并写出生成文件
    ///
    /// 写出失败记录为诊断，不影响其余文件。
    pub async fn run_and_write(
        &self,
        unit: CompilationUnit,
        writer: &dyn ArtifactWriter,
    ) -> Result<GenerationReport, PipelineError> {
        let mut report = self.run(unit).await?;

        for file in &report.files {
            match writer.write(file).await {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    error!("{} 写出 {} 失败: {}", writer.name(), file.file_name, e);
                    report
                        .diagnostics
                        .push(Diagnostic::from_error(writer.name(), &e, None));
                }
            }
        }

        info!("{} 写出 {} 个文件", writer.name(), report.written.len());
        Ok(report)
    }
}

fn class_address(class: &ClassDeclaration) -> usize {
    class as *const ClassDeclaration as usize
}

impl std::fmt::Debug for GenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPipeline")
            .field("settings", &self.settings)
            .field("generators", &self.generator_names())
            .field("has_custom_hierarchy", &self.hierarchy.is_some())
            .finish()
    }
}
