//! 元数据提取
//!
//! 把标记注解转换为绑定记录和提供记录。每个标记出现一次就产生一条记录，
//! 同一成员上的限定符按源码顺序原样附加到它产生的全部记录上。

use crate::scanner::AnnotatedMember;
use crate::validator::verify_bound_type;
use codegen_abstractions::{AnnotationSchema, MarkerAnnotation, MarkerKind, TypeHierarchy};
use codegen_common::{
    AnnotationInstance, ClassDeclaration, ElementRef, FqName, GenerationResult, NamingConventions,
    TypeRef,
};

/// 绑定到父类型的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRecord {
    /// 成员名称
    pub member_name: String,
    /// 成员类型（类引用）
    pub member_type: FqName,
    /// 绑定的父类型
    pub bound_type: FqName,
    /// 声明成员的类
    pub owner: FqName,
    /// 限定符注解
    pub qualifiers: Vec<AnnotationInstance>,
}

/// 发布到作用域的提供记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRecord {
    /// 生成的属性名称
    pub name: String,
    /// 提供的类型
    pub type_ref: TypeRef,
    /// 限定符注解
    pub qualifiers: Vec<AnnotationInstance>,
    /// 显式作用域
    pub scope: Option<FqName>,
    /// 来源元素
    pub element: ElementRef,
}

/// 提取成员上的绑定记录并校验绑定类型
pub fn extract_bindings(
    member: &AnnotatedMember<'_>,
    schema: &AnnotationSchema,
    hierarchy: &dyn TypeHierarchy,
) -> GenerationResult<Vec<BindingRecord>> {
    let member_type = member.type_ref.class.clone();
    let qualifiers = schema.qualifiers(member.annotations);

    let mut records = Vec::new();
    for marker in schema.markers(member.annotations, MarkerKind::ProvidesBinding, &member.element)? {
        let MarkerAnnotation::ProvidesBinding { bound_type } = marker else {
            continue;
        };
        verify_bound_type(&member.element, &member_type, &bound_type, hierarchy)?;
        records.push(BindingRecord {
            member_name: member.name().to_string(),
            member_type: member_type.clone(),
            bound_type,
            owner: member.element.owner.clone(),
            qualifiers: qualifiers.clone(),
        });
    }
    Ok(records)
}

/// 提取模块成员上的提供记录，名称默认取成员名
pub fn extract_member_provisions(
    member: &AnnotatedMember<'_>,
    schema: &AnnotationSchema,
) -> GenerationResult<Vec<ProvisionRecord>> {
    provisions(
        member.annotations,
        member.name(),
        member.type_ref,
        &member.element,
        schema,
    )
}

/// 提取类级提供记录，名称默认取首字母小写的简短类名
pub fn extract_class_provisions(
    class: &ClassDeclaration,
    schema: &AnnotationSchema,
) -> GenerationResult<Vec<ProvisionRecord>> {
    provisions(
        &class.annotations,
        &NamingConventions::default_provision_name(class),
        &class.as_type(),
        &ElementRef::class(class.fq_name.clone()),
        schema,
    )
}

fn provisions(
    annotations: &[AnnotationInstance],
    default_name: &str,
    type_ref: &TypeRef,
    element: &ElementRef,
    schema: &AnnotationSchema,
) -> GenerationResult<Vec<ProvisionRecord>> {
    let qualifiers = schema.qualifiers(annotations);

    Ok(schema
        .markers(annotations, MarkerKind::Contribution, element)?
        .into_iter()
        .filter_map(|marker| match marker {
            MarkerAnnotation::Contribution { scope, name } => Some(ProvisionRecord {
                name: name.unwrap_or_else(|| default_name.to_string()),
                type_ref: type_ref.clone(),
                qualifiers: qualifiers.clone(),
                scope,
                element: element.clone(),
            }),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_module_members;
    use crate::test_support::{contribution, named, provides, provides_binding};
    use crate::DeclaredTypeHierarchy;
    use codegen_common::{
        CompilationUnit, FunctionDeclaration, GenerationError, PropertyDeclaration, TypeArgument,
    };

    #[test]
    fn test_repeated_bindings_share_qualifiers() {
        let schema = AnnotationSchema::default();
        let unit = CompilationUnit::new("app").with_external_supertypes(
            "com.example.RepoImpl",
            vec![
                FqName::new("com.example.Repository"),
                FqName::new("com.example.Closeable"),
            ],
        );
        let class = ClassDeclaration::new("com.example", "Repo").with_function(
            FunctionDeclaration::new("repo", TypeRef::class("com.example.RepoImpl"))
                .with_annotation(provides())
                .with_annotation(named("main"))
                .with_annotation(provides_binding("com.example.Repository"))
                .with_annotation(provides_binding("com.example.Closeable")),
        );

        let members = scan_module_members(&class, &schema.provides_binding);
        let records =
            extract_bindings(&members[0], &schema, &DeclaredTypeHierarchy::from_unit(&unit))
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bound_type, FqName::new("com.example.Repository"));
        assert_eq!(records[1].bound_type, FqName::new("com.example.Closeable"));
        assert_eq!(records[0].member_name, "repo");
        assert_eq!(records[0].owner, FqName::new("com.example.Repo"));
        assert_eq!(records[1].qualifiers, vec![named("main")]);
    }

    #[test]
    fn test_invalid_bound_type_fails_extraction() {
        let schema = AnnotationSchema::default();
        let class = ClassDeclaration::new("com.example", "Repo").with_function(
            FunctionDeclaration::new("repo", TypeRef::class("com.example.RepoImpl"))
                .with_annotation(provides())
                .with_annotation(provides_binding("com.example.Repository")),
        );

        let members = scan_module_members(&class, &schema.provides_binding);
        let result = extract_bindings(&members[0], &schema, &DeclaredTypeHierarchy::default());

        assert!(matches!(result, Err(GenerationError::InvalidBoundType { .. })));
    }

    #[test]
    fn test_member_provisions_default_and_explicit_names() {
        let schema = AnnotationSchema::default();
        let client_type = TypeRef::class("kotlin.collections.List")
            .with_argument(TypeArgument::Type(TypeRef::class("com.example.HttpClient")));
        let class = ClassDeclaration::new("com.example", "NetModule").with_property(
            PropertyDeclaration::new("client", client_type.clone())
                .with_annotation(provides())
                .with_annotation(contribution(None, None))
                .with_annotation(contribution(Some("com.example.AppScope"), Some("mainClient")))
                .with_annotation(contribution(Some("kotlin.Unit"), Some(""))),
        );

        let members = scan_module_members(&class, &schema.contribution);
        let records = extract_member_provisions(&members[0], &schema).unwrap();

        let summary: Vec<(&str, Option<&str>)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.scope.as_ref().map(FqName::as_str)))
            .collect();
        assert_eq!(
            summary,
            [
                ("client", None),
                ("mainClient", Some("com.example.AppScope")),
                ("client", None),
            ]
        );
        assert!(records.iter().all(|r| r.type_ref == client_type));
        assert_eq!(records[0].element.to_string(), "com.example.NetModule#client");
    }

    #[test]
    fn test_class_provisions_use_decapitalized_name() {
        let schema = AnnotationSchema::default();
        let class = ClassDeclaration::new("com.example", "HttpClientFactory")
            .with_annotation(named("shared"))
            .with_annotation(contribution(Some("com.example.AppScope"), None));

        let records = extract_class_provisions(&class, &schema).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "httpClientFactory");
        assert_eq!(records[0].type_ref, TypeRef::class("com.example.HttpClientFactory"));
        assert_eq!(records[0].qualifiers, vec![named("shared")]);
        assert_eq!(records[0].element, ElementRef::class(class.fq_name.clone()));
    }
}
