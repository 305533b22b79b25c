//! 自动成员注入的生成器

use crate::scanner::scan_classes;
use crate::synthesizer::{synthesize_auto_wire, to_generated_file};
use codegen_abstractions::{
    CodeGenerator, GeneratedFile, GenerationContext, MarkerAnnotation, MarkerKind,
};
use codegen_common::{
    ClassDeclaration, CompilationUnit, ElementRef, GenerationError, GenerationResult,
};
use tracing::info;

/// 为带有自动注入标记的类生成成员注入模块和组件
#[derive(Debug, Default)]
pub struct AutoWireCodeGenerator;

impl AutoWireCodeGenerator {
    /// 创建生成器
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for AutoWireCodeGenerator {
    fn name(&self) -> &str {
        "auto_wire"
    }

    fn owning_classes<'a>(
        &self,
        unit: &'a CompilationUnit,
        context: &GenerationContext,
    ) -> Vec<&'a ClassDeclaration> {
        let marker = &context.schema.auto_wire;
        scan_classes(unit, |class| class.is_annotated_with(marker))
    }

    fn generate_for_class(
        &self,
        class: &ClassDeclaration,
        context: &GenerationContext,
    ) -> GenerationResult<Option<GeneratedFile>> {
        let element = ElementRef::class(class.fq_name.clone());
        let markers = context
            .schema
            .markers(&class.annotations, MarkerKind::AutoWire, &element)?;

        let scope = match markers.as_slice() {
            [MarkerAnnotation::AutoWire { scope }] => scope,
            _ => {
                return Err(GenerationError::malformed(
                    element,
                    &context.schema.auto_wire,
                    format!("每个类只能有一个自动注入标记，实际 {} 个", markers.len()),
                ));
            }
        };

        let file = synthesize_auto_wire(class, scope, &context.names);
        info!("为 {} 生成自动注入声明 {}", class.fq_name, file.name());
        Ok(Some(to_generated_file(&file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{auto_wire, context};
    use codegen_abstractions::AnnotationSchema;
    use codegen_common::AnnotationInstance;

    #[test]
    fn test_module_and_component_pair() {
        let unit = CompilationUnit::new("app").with_class(
            ClassDeclaration::new("com.example", "LoginActivity")
                .with_annotation(auto_wire("com.example.ActivityScope")),
        );

        let outcomes = AutoWireCodeGenerator::new().generate(&unit, &context(&unit));

        assert_eq!(outcomes.len(), 1);
        let file = outcomes[0].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(file.file_name, "LoginActivityAICodeGen");
        assert_eq!(
            file.declarations,
            ["LoginActivityAICodeGenModule", "LoginActivityAICodeGenComponent"]
        );
        assert!(file.content.contains("@get:ClassKey(LoginActivity::class)\n"));
        assert!(file.content.contains("  public fun LoginActivity.inject()\n"));
        assert_eq!(
            file.content.matches("@ContributesTo(ActivityScope::class)").count(),
            2
        );
    }

    #[test]
    fn test_nested_target_name() {
        let unit = CompilationUnit::new("app").with_class(
            ClassDeclaration::new("com.example", "Screens").with_nested(
                ClassDeclaration::new("com.example", "Screens.Login")
                    .with_annotation(auto_wire("com.example.ActivityScope")),
            ),
        );

        let outcomes = AutoWireCodeGenerator::new().generate(&unit, &context(&unit));

        let file = outcomes[0].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(file.file_name, "Screens_LoginAICodeGen");
        assert!(file.content.contains("import com.example.Screens.Login\n"));
        assert!(file
            .content
            .contains("public val MembersInjector<Login>.membersInjector"));
    }

    #[test]
    fn test_marker_without_scope_is_malformed() {
        let class = ClassDeclaration::new("com.example", "LoginActivity")
            .with_annotation(AnnotationInstance::new(AnnotationSchema::default().auto_wire));
        let unit = CompilationUnit::new("app").with_class(class);

        let result = AutoWireCodeGenerator::new().generate_for_class(&unit.classes[0], &context(&unit));

        assert!(matches!(result, Err(GenerationError::MalformedAnnotation { .. })));
    }

    #[test]
    fn test_repeated_marker_is_malformed() {
        let class = ClassDeclaration::new("com.example", "LoginActivity")
            .with_annotation(auto_wire("com.example.ActivityScope"))
            .with_annotation(auto_wire("com.example.AppScope"));
        let unit = CompilationUnit::new("app").with_class(class);

        let result = AutoWireCodeGenerator::new().generate_for_class(&unit.classes[0], &context(&unit));

        assert!(matches!(result, Err(GenerationError::MalformedAnnotation { .. })));
    }
}
