//! 声明合成
//!
//! 每次所属类调用构建一个 [`FileSpec`]，文件名与主接口同名。

use crate::extractor::{BindingRecord, ProvisionRecord};
use crate::grouping::ScopeGroups;
use crate::poet::{
    AnnotationSpec, CodeBlock, FileSpec, FunSpec, PropertySpec, TypeName, TypeSpec, UseSiteTarget,
};
use codegen_abstractions::{GeneratedFile, GeneratedNames};
use codegen_common::{names, AnnotationInstance, ClassDeclaration, FqName, NamingConventions};

/// 绑定模块接口：`@Module`，每个作用域一个 `@ContributesTo`，
/// 每条绑定记录一个 `@get:Binds` 扩展属性。
/// 限定符同时作用于绑定的输出（getter）和输入（接收者）
pub fn synthesize_bindings(
    owner: &ClassDeclaration,
    bindings: &[BindingRecord],
    scopes: &[FqName],
    naming: &GeneratedNames,
) -> FileSpec {
    let class_name = NamingConventions::generated_class_name(owner, &naming.and_binds_suffix);

    let mut interface = TypeSpec::interface_builder(class_name.clone())
        .add_annotation(AnnotationSpec::builder(&names::DAGGER_MODULE));
    for scope in scopes {
        interface = interface.add_annotation(contributes_to(scope));
    }

    for binding in bindings {
        let property = PropertySpec::builder(
            binding.member_name.clone(),
            TypeName::class(binding.bound_type.clone()),
        )
        .receiver(TypeName::class(binding.member_type.clone()))
        .add_annotation(getter(AnnotationSpec::builder(&names::DAGGER_BINDS)));
        let property = with_receiver_qualifiers(
            with_qualifiers(property, &binding.qualifiers),
            &binding.qualifiers,
        );
        interface = interface.add_property(property);
    }

    FileSpec::builder(owner.package.clone(), class_name).add_type(interface)
}

/// 提供组件接口：每个作用域组一个 `<Owner>ProvisionsCodeGen<序号>Component`
pub fn synthesize_provisions(
    owner: &ClassDeclaration,
    groups: &ScopeGroups<ProvisionRecord>,
    naming: &GeneratedNames,
) -> FileSpec {
    let base_name = NamingConventions::generated_class_name(owner, &naming.provisions_suffix);

    let mut file = FileSpec::builder(owner.package.clone(), base_name.clone());
    for (index, (scope, records)) in groups.iter().enumerate() {
        let mut interface = TypeSpec::interface_builder(format!(
            "{base_name}{index}{}",
            naming.component_suffix
        ))
        .add_annotation(contributes_to(scope));

        for record in records {
            let property =
                PropertySpec::builder(record.name.clone(), TypeName::from(&record.type_ref));
            interface = interface.add_property(with_qualifiers(property, &record.qualifiers));
        }
        file = file.add_type(interface);
    }
    file
}

/// 自动注入的模块和组件接口对
pub fn synthesize_auto_wire(
    target: &ClassDeclaration,
    scope: &FqName,
    naming: &GeneratedNames,
) -> FileSpec {
    let base_name = NamingConventions::generated_class_name(target, &naming.auto_wire_suffix);
    let target_type = TypeName::class(target.fq_name.clone());
    let injector = TypeName::class(names::DAGGER_MEMBERS_INJECTOR.clone());

    let module = TypeSpec::interface_builder(format!("{base_name}{}", naming.module_suffix))
        .add_annotation(AnnotationSpec::builder(&names::DAGGER_MODULE))
        .add_annotation(contributes_to(scope))
        .add_property(
            PropertySpec::builder(
                "membersInjector",
                injector.clone().parameterized_by(vec![TypeName::Star]),
            )
            .receiver(injector.parameterized_by(vec![target_type.clone()]))
            .add_annotation(getter(AnnotationSpec::builder(&names::DAGGER_BINDS)))
            .add_annotation(getter(AnnotationSpec::builder(&names::DAGGER_INTO_MAP)))
            .add_annotation(getter(
                AnnotationSpec::builder(&names::DAGGER_CLASS_KEY)
                    .add_member(CodeBlock::class_literal(&target.fq_name)),
            )),
        );

    let component = TypeSpec::interface_builder(format!("{base_name}{}", naming.component_suffix))
        .add_annotation(contributes_to(scope))
        .add_function(FunSpec::builder("inject").receiver(target_type));

    FileSpec::builder(target.package.clone(), base_name)
        .add_type(module)
        .add_type(component)
}

/// 渲染文件规格
pub fn to_generated_file(file: &FileSpec) -> GeneratedFile {
    GeneratedFile {
        package: file.package().to_string(),
        file_name: file.name().to_string(),
        content: file.render(),
        declarations: file.types().iter().map(|t| t.name().to_string()).collect(),
    }
}

fn contributes_to(scope: &FqName) -> AnnotationSpec {
    AnnotationSpec::builder(&names::CONTRIBUTES_TO).add_member(CodeBlock::class_literal(scope))
}

fn getter(annotation: AnnotationSpec) -> AnnotationSpec {
    annotation.use_site_target(UseSiteTarget::Get)
}

fn with_qualifiers(mut property: PropertySpec, qualifiers: &[AnnotationInstance]) -> PropertySpec {
    for qualifier in qualifiers {
        property = property.add_annotation(getter(AnnotationSpec::from_instance(qualifier)));
    }
    property
}

fn with_receiver_qualifiers(
    mut property: PropertySpec,
    qualifiers: &[AnnotationInstance],
) -> PropertySpec {
    for qualifier in qualifiers {
        property = property.add_annotation(
            AnnotationSpec::from_instance(qualifier).use_site_target(UseSiteTarget::Receiver),
        );
    }
    property
}
