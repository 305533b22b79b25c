//! 共存注解校验

use crate::scanner::AnnotatedMember;
use codegen_abstractions::{is_strict_supertype, TypeHierarchy};
use codegen_common::{is_annotated_with, ElementRef, FqName, GenerationError, GenerationResult};

/// 要求成员同时带有 `accepted` 中的至少一个注解
pub fn require_companion(
    member: &AnnotatedMember<'_>,
    marker: &FqName,
    accepted: &[&FqName],
) -> GenerationResult<()> {
    if accepted
        .iter()
        .any(|required| is_annotated_with(member.annotations, required))
    {
        return Ok(());
    }

    Err(GenerationError::MissingRequiredCompanionAnnotation {
        element: member.element.clone(),
        marker: format!("@{}", marker.short_name()),
        required: accepted
            .iter()
            .map(|required| format!("@{}", required.short_name()))
            .collect::<Vec<_>>()
            .join(" 或 "),
    })
}

/// 校验绑定类型是成员类型的严格父类型
pub fn verify_bound_type(
    element: &ElementRef,
    member_type: &FqName,
    bound_type: &FqName,
    hierarchy: &dyn TypeHierarchy,
) -> GenerationResult<()> {
    if is_strict_supertype(hierarchy, member_type, bound_type) {
        Ok(())
    } else {
        Err(GenerationError::InvalidBoundType {
            element: element.clone(),
            bound_type: bound_type.clone(),
            member_type: member_type.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::MemberKind;
    use crate::test_support::{binds, provides};
    use crate::DeclaredTypeHierarchy;
    use codegen_common::{names, CompilationUnit, TypeRef};

    fn member<'a>(
        type_ref: &'a TypeRef,
        annotations: &'a [codegen_common::AnnotationInstance],
    ) -> AnnotatedMember<'a> {
        AnnotatedMember {
            element: ElementRef::member(FqName::new("com.example.NetModule"), "client"),
            kind: MemberKind::Function,
            type_ref,
            annotations,
        }
    }

    #[test]
    fn test_companion_annotation_present() {
        let type_ref = TypeRef::class("com.example.Client");
        let annotations = [binds()];
        let marker = FqName::new("com.example.Contribution");

        assert!(require_companion(
            &member(&type_ref, &annotations),
            &marker,
            &[&*names::DAGGER_PROVIDES, &*names::DAGGER_BINDS]
        )
        .is_ok());
    }

    #[test]
    fn test_missing_companion_annotation() {
        let type_ref = TypeRef::class("com.example.Client");
        let annotations = [binds()];
        let marker = FqName::new("com.example.ProvidesBinding");

        let error = require_companion(
            &member(&type_ref, &annotations),
            &marker,
            &[&*names::DAGGER_PROVIDES],
        )
        .unwrap_err();

        match error {
            GenerationError::MissingRequiredCompanionAnnotation {
                element,
                marker,
                required,
            } => {
                assert_eq!(element.to_string(), "com.example.NetModule#client");
                assert_eq!(marker, "@ProvidesBinding");
                assert_eq!(required, "@Provides");
            }
            other => panic!("unexpected error: {other}"),
        }

        let annotations = [provides()];
        assert!(require_companion(
            &member(&type_ref, &annotations),
            &marker,
            &[&*names::DAGGER_PROVIDES]
        )
        .is_ok());
    }

    #[test]
    fn test_bound_type_must_be_strict_supertype() {
        let unit = CompilationUnit::new("app").with_external_supertypes(
            "com.example.RepoImpl",
            vec![FqName::new("com.example.Repository")],
        );
        let hierarchy = DeclaredTypeHierarchy::from_unit(&unit);
        let element = ElementRef::member(FqName::new("com.example.Repo"), "repo");
        let implementation = FqName::new("com.example.RepoImpl");

        assert!(verify_bound_type(
            &element,
            &implementation,
            &FqName::new("com.example.Repository"),
            &hierarchy
        )
        .is_ok());

        for bound in ["com.example.RepoImpl", "com.example.Unrelated"] {
            let result = verify_bound_type(&element, &implementation, &FqName::new(bound), &hierarchy);
            assert!(matches!(
                result,
                Err(GenerationError::InvalidBoundType { ref bound_type, .. }) if bound_type.as_str() == bound
            ));
        }
    }
}
