//! 生成器场景测试：直接驱动三个生成器，检查生成的声明

use code_generation::{
    AutoWireCodeGenerator, BindingsCodeGenerator, DeclaredTypeHierarchy, ProvisionsCodeGenerator,
};
use codegen_abstractions::{AnnotationSchema, CodeGenerator, GeneratedFile, GenerationContext};
use codegen_common::{
    names, AnnotationInstance, AnnotationValue, ClassDeclaration, CompilationUnit, FqName,
    FunctionDeclaration, GenerationError, GenerationResult, PropertyDeclaration, TypeRef,
};
use std::sync::Arc;

fn class_value(name: &str) -> AnnotationValue {
    AnnotationValue::Class(FqName::new(name))
}

fn module() -> AnnotationInstance {
    AnnotationInstance::new(names::DAGGER_MODULE.clone())
}

fn provides() -> AnnotationInstance {
    AnnotationInstance::new(names::DAGGER_PROVIDES.clone())
}

fn contributes_to(scope: &str) -> AnnotationInstance {
    AnnotationInstance::new(names::CONTRIBUTES_TO.clone()).with_positional(class_value(scope))
}

fn provides_binding(bound_type: &str) -> AnnotationInstance {
    AnnotationInstance::new(AnnotationSchema::default().provides_binding)
        .with_named("boundType", class_value(bound_type))
}

fn contribution(name: Option<&str>) -> AnnotationInstance {
    let annotation = AnnotationInstance::new(AnnotationSchema::default().contribution);
    match name {
        Some(name) => annotation.with_named("name", AnnotationValue::String(name.to_string())),
        None => annotation,
    }
}

fn context(unit: &CompilationUnit) -> GenerationContext {
    GenerationContext::new(Arc::new(DeclaredTypeHierarchy::from_unit(unit)))
}

fn generate_one(
    generator: &dyn CodeGenerator,
    unit: &CompilationUnit,
) -> GenerationResult<Option<GeneratedFile>> {
    let mut outcomes = generator.generate(unit, &context(unit));
    assert_eq!(outcomes.len(), 1, "expected exactly one owning class");
    outcomes.remove(0).result
}

fn repo_unit(bound_type: &str, extra: Vec<AnnotationInstance>) -> CompilationUnit {
    let mut function = FunctionDeclaration::new("repo", TypeRef::class("com.example.RepoImpl"))
        .with_annotation(provides_binding(bound_type));
    for annotation in extra {
        function = function.with_annotation(annotation);
    }
    CompilationUnit::new("app")
        .with_class(
            ClassDeclaration::new("com.example", "Repo")
                .with_annotation(module())
                .with_function(function),
        )
        .with_external_supertypes(
            "com.example.RepoImpl",
            vec![FqName::new("com.example.Repository")],
        )
}

fn net_module(scopes: &[&str], name: Option<&str>) -> CompilationUnit {
    let mut class = ClassDeclaration::new("com.example", "NetModule").with_annotation(module());
    for scope in scopes {
        class = class.with_annotation(contributes_to(scope));
    }
    CompilationUnit::new("app").with_class(
        class.with_property(
            PropertyDeclaration::new("client", TypeRef::class("com.example.HttpClient"))
                .with_annotation(provides())
                .with_annotation(contribution(name)),
        ),
    )
}

#[test]
fn scenario_provider_bound_to_supertype() {
    let unit = repo_unit("com.example.Repository", vec![provides()]);

    let file = generate_one(&BindingsCodeGenerator::new(), &unit)
        .unwrap()
        .unwrap();

    assert_eq!(file.declarations, ["RepoAndBindsCodeGen"]);
    assert_eq!(file.content.matches("public val ").count(), 1);
    assert!(file.content.contains("  @get:Binds\n  public val RepoImpl.repo: Repository\n"));
}

#[test]
fn scenario_provision_inherits_module_scope() {
    let unit = net_module(&["com.example.AppScope"], None);

    let file = generate_one(&ProvisionsCodeGenerator::new(), &unit)
        .unwrap()
        .unwrap();

    assert_eq!(file.declarations.len(), 1);
    assert!(file.content.contains("@ContributesTo(AppScope::class)\n"));
    assert!(file.content.contains("  public val client: HttpClient\n"));
}

#[test]
fn scenario_auto_wire_module_and_component() {
    let unit = CompilationUnit::new("app").with_class(
        ClassDeclaration::new("com.example", "LoginActivity").with_annotation(
            AnnotationInstance::new(AnnotationSchema::default().auto_wire)
                .with_positional(class_value("com.example.ActivityScope")),
        ),
    );

    let file = generate_one(&AutoWireCodeGenerator::new(), &unit)
        .unwrap()
        .unwrap();

    assert_eq!(
        file.declarations,
        ["LoginActivityAICodeGenModule", "LoginActivityAICodeGenComponent"]
    );
    assert!(file.content.contains(
        "  @get:Binds\n  @get:IntoMap\n  @get:ClassKey(LoginActivity::class)\n  public val MembersInjector<LoginActivity>.membersInjector: MembersInjector<*>\n"
    ));
    assert!(file.content.contains("  public fun LoginActivity.inject()\n"));
    assert_eq!(file.content.matches("@ContributesTo(ActivityScope::class)").count(), 2);
}

#[test]
fn scenario_explicit_provision_name() {
    let unit = net_module(&["com.example.AppScope"], Some("mainClient"));

    let file = generate_one(&ProvisionsCodeGenerator::new(), &unit)
        .unwrap()
        .unwrap();

    assert!(file.content.contains("  public val mainClient: HttpClient\n"));
    assert!(!file.content.contains("val client"));
}

#[test]
fn scenario_two_module_scopes() {
    let unit = net_module(&["com.example.AppScope", "com.example.UserScope"], None);

    let file = generate_one(&ProvisionsCodeGenerator::new(), &unit)
        .unwrap()
        .unwrap();

    assert_eq!(
        file.declarations,
        [
            "NetModuleProvisionsCodeGen0Component",
            "NetModuleProvisionsCodeGen1Component"
        ]
    );
    let app = file.content.find("@ContributesTo(AppScope::class)").unwrap();
    let user = file.content.find("@ContributesTo(UserScope::class)").unwrap();
    assert!(app < user);
    assert_eq!(file.content.matches("  public val client: HttpClient\n").count(), 2);
}

#[test]
fn bound_type_outside_supertype_closure_is_rejected() {
    for bound_type in ["com.example.RepoImpl", "com.example.Unrelated"] {
        let unit = repo_unit(bound_type, vec![provides()]);

        let result = generate_one(&BindingsCodeGenerator::new(), &unit);

        match result {
            Err(GenerationError::InvalidBoundType {
                element,
                bound_type: reported,
                member_type,
            }) => {
                assert_eq!(element.to_string(), "com.example.Repo#repo");
                assert_eq!(reported.as_str(), bound_type);
                assert_eq!(member_type.as_str(), "com.example.RepoImpl");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

#[test]
fn marker_without_required_companion_is_rejected() {
    let bindings = repo_unit("com.example.Repository", Vec::new());
    assert!(matches!(
        generate_one(&BindingsCodeGenerator::new(), &bindings),
        Err(GenerationError::MissingRequiredCompanionAnnotation { .. })
    ));

    let provisions = CompilationUnit::new("app").with_class(
        ClassDeclaration::new("com.example", "NetModule")
            .with_annotation(module())
            .with_annotation(contributes_to("com.example.AppScope"))
            .with_property(
                PropertyDeclaration::new("client", TypeRef::class("com.example.HttpClient"))
                    .with_annotation(contribution(None)),
            ),
    );
    assert!(matches!(
        generate_one(&ProvisionsCodeGenerator::new(), &provisions),
        Err(GenerationError::MissingRequiredCompanionAnnotation { .. })
    ));
}

#[test]
fn provision_without_any_scope_is_unresolved() {
    let unit = net_module(&[], None);

    let result = generate_one(&ProvisionsCodeGenerator::new(), &unit);

    assert!(matches!(result, Err(GenerationError::UnresolvedScope { .. })));
}

#[test]
fn generation_is_idempotent() {
    let unit = net_module(&["com.example.AppScope", "com.example.UserScope"], Some("main"));

    let first = generate_one(&ProvisionsCodeGenerator::new(), &unit).unwrap();
    let second = generate_one(&ProvisionsCodeGenerator::new(), &unit).unwrap();

    assert_eq!(first, second);
}
