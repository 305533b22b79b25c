//! 绑定到父类型的生成器

use crate::extractor::extract_bindings;
use crate::grouping::distinct_scopes;
use crate::scanner::{scan_classes, scan_module_members};
use crate::synthesizer::{synthesize_bindings, to_generated_file};
use crate::validator::require_companion;
use codegen_abstractions::{contributed_scopes, CodeGenerator, GeneratedFile, GenerationContext};
use codegen_common::{
    names, ClassDeclaration, CompilationUnit, ElementRef, GenerationResult,
};
use tracing::{debug, info};

/// 为 `@Module` 类中带有绑定标记的提供者生成 `@Binds` 模块接口
#[derive(Debug, Default)]
pub struct BindingsCodeGenerator;

impl BindingsCodeGenerator {
    /// 创建生成器
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for BindingsCodeGenerator {
    fn name(&self) -> &str {
        "bindings"
    }

    fn owning_classes<'a>(
        &self,
        unit: &'a CompilationUnit,
        _context: &GenerationContext,
    ) -> Vec<&'a ClassDeclaration> {
        scan_classes(unit, |class| class.is_annotated_with(&names::DAGGER_MODULE))
    }

    fn generate_for_class(
        &self,
        class: &ClassDeclaration,
        context: &GenerationContext,
    ) -> GenerationResult<Option<GeneratedFile>> {
        let marker = &context.schema.provides_binding;

        let mut bindings = Vec::new();
        for member in scan_module_members(class, marker) {
            require_companion(&member, marker, &[&*names::DAGGER_PROVIDES])?;
            bindings.extend(extract_bindings(
                &member,
                &context.schema,
                context.hierarchy.as_ref(),
            )?);
        }

        if bindings.is_empty() {
            debug!("{} 没有绑定记录", class.fq_name);
            return Ok(None);
        }

        let scopes = contributed_scopes(
            &class.annotations,
            &ElementRef::class(class.fq_name.clone()),
        )?;
        let file = synthesize_bindings(
            class,
            &bindings,
            &distinct_scopes(&scopes),
            &context.names,
        );

        info!(
            "为 {} 生成绑定模块 {}，共 {} 条绑定",
            class.fq_name,
            file.name(),
            bindings.len()
        );
        Ok(Some(to_generated_file(&file)))
    }
}
