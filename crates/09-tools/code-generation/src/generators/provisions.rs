//! 发布到作用域的生成器

use crate::extractor::{extract_class_provisions, extract_member_provisions};
use crate::grouping::group;
use crate::scanner::{scan_classes, scan_module_members};
use crate::synthesizer::{synthesize_provisions, to_generated_file};
use crate::validator::require_companion;
use codegen_abstractions::{contributed_scopes, CodeGenerator, GeneratedFile, GenerationContext};
use codegen_common::{
    names, ClassDeclaration, CompilationUnit, ElementRef, FqName, GenerationResult,
};
use tracing::{debug, info};

/// 把提供的值发布到作用域组件
///
/// 类本身带有发布标记时按类级处理，否则处理 `@Module` 类的成员。
#[derive(Debug, Default)]
pub struct ProvisionsCodeGenerator;

impl ProvisionsCodeGenerator {
    /// 创建生成器
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for ProvisionsCodeGenerator {
    fn name(&self) -> &str {
        "provisions"
    }

    fn owning_classes<'a>(
        &self,
        unit: &'a CompilationUnit,
        context: &GenerationContext,
    ) -> Vec<&'a ClassDeclaration> {
        let marker = &context.schema.contribution;
        scan_classes(unit, |class| {
            class.is_annotated_with(marker) || class.is_annotated_with(&names::DAGGER_MODULE)
        })
    }

    fn generate_for_class(
        &self,
        class: &ClassDeclaration,
        context: &GenerationContext,
    ) -> GenerationResult<Option<GeneratedFile>> {
        let marker = &context.schema.contribution;

        let (records, default_scopes) = if class.is_annotated_with(marker) {
            (extract_class_provisions(class, &context.schema)?, Vec::new())
        } else {
            let mut records = Vec::new();
            for member in scan_module_members(class, marker) {
                require_companion(
                    &member,
                    marker,
                    &[&*names::DAGGER_PROVIDES, &*names::DAGGER_BINDS],
                )?;
                records.extend(extract_member_provisions(&member, &context.schema)?);
            }
            if records.is_empty() {
                debug!("{} 没有提供记录", class.fq_name);
                return Ok(None);
            }
            let scopes: Vec<FqName> = contributed_scopes(
                &class.annotations,
                &ElementRef::class(class.fq_name.clone()),
            )?;
            (records, scopes)
        };

        let groups = group(records, &default_scopes, context.scope_fan_out)?;
        let file = synthesize_provisions(class, &groups, &context.names);

        info!(
            "为 {} 生成提供组件 {}，作用域 {} 个",
            class.fq_name,
            file.name(),
            groups.len()
        );
        Ok(Some(to_generated_file(&file)))
    }
}
