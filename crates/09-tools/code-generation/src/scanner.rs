//! 声明扫描
//!
//! 扫描只读取声明语料，返回结果的顺序完全由声明顺序决定。

use codegen_common::{
    is_annotated_with, AnnotationInstance, ClassDeclaration, CompilationUnit, ElementRef, FqName,
    TypeRef,
};

/// 成员种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// 函数，类型取返回类型
    Function,
    /// 属性
    Property,
}

/// 带有标记注解的模块成员
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedMember<'a> {
    /// 成员标识，所属者为实际声明它的类或伴生对象
    pub element: ElementRef,
    /// 成员种类
    pub kind: MemberKind,
    /// 成员类型
    pub type_ref: &'a TypeRef,
    /// 成员上的全部注解
    pub annotations: &'a [AnnotationInstance],
}

impl AnnotatedMember<'_> {
    /// 成员名称
    pub fn name(&self) -> &str {
        self.element.member.as_deref().unwrap_or_default()
    }
}

/// 深度优先枚举满足条件的类（顶层类和嵌套类）
pub fn scan_classes<'a, P>(unit: &'a CompilationUnit, predicate: P) -> Vec<&'a ClassDeclaration>
where
    P: Fn(&ClassDeclaration) -> bool,
{
    unit.all_classes()
        .into_iter()
        .filter(|class| predicate(class))
        .collect()
}

/// 枚举带有给定标记的模块成员
///
/// 伴生对象和类本身视为同一个命名空间：先是全部函数，再是全部属性，
/// 每一类中伴生对象的成员排在类自身的成员之前。
pub fn scan_module_members<'a>(
    class: &'a ClassDeclaration,
    marker: &FqName,
) -> Vec<AnnotatedMember<'a>> {
    let holders: Vec<&ClassDeclaration> = class
        .companion_objects()
        .chain(std::iter::once(class))
        .collect();

    let functions = holders.iter().copied().flat_map(move |holder| {
        holder
            .functions
            .iter()
            .filter(move |function| is_annotated_with(&function.annotations, marker))
            .map(move |function| AnnotatedMember {
                element: ElementRef::member(holder.fq_name.clone(), function.name.clone()),
                kind: MemberKind::Function,
                type_ref: &function.return_type,
                annotations: &function.annotations,
            })
    });

    let properties = holders.iter().copied().flat_map(move |holder| {
        holder
            .properties
            .iter()
            .filter(move |property| is_annotated_with(&property.annotations, marker))
            .map(move |property| AnnotatedMember {
                element: ElementRef::member(holder.fq_name.clone(), property.name.clone()),
                kind: MemberKind::Property,
                type_ref: &property.type_ref,
                annotations: &property.annotations,
            })
    });

    functions.chain(properties).collect()
}
