//! 声明语料模型
//!
//! 宿主编译器前端把一个编译单元中的类、函数和属性描述为这里的值对象，
//! 代码生成器只读取它们，从不修改。

use crate::metadata::{is_annotated_with, AnnotationInstance, FqName, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 类声明的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// 普通类
    #[default]
    Class,
    /// 接口
    Interface,
    /// 单例对象
    Object,
    /// 附属于类的伴生对象
    CompanionObject,
}

/// 函数声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// 函数名称
    pub name: String,
    /// 返回类型
    pub return_type: TypeRef,
    /// 注解（保持源码顺序）
    #[serde(default)]
    pub annotations: Vec<AnnotationInstance>,
}

/// 属性声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// 属性名称
    pub name: String,
    /// 属性类型
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// 注解（保持源码顺序）
    #[serde(default)]
    pub annotations: Vec<AnnotationInstance>,
}

/// 类声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// 全限定名
    pub fq_name: FqName,
    /// 所在包，根包为空字符串
    #[serde(default)]
    pub package: String,
    /// 声明种类
    #[serde(default)]
    pub kind: ClassKind,
    /// 类上的注解
    #[serde(default)]
    pub annotations: Vec<AnnotationInstance>,
    /// 直接父类型
    #[serde(default)]
    pub supertypes: Vec<FqName>,
    /// 直接声明的函数
    #[serde(default)]
    pub functions: Vec<FunctionDeclaration>,
    /// 直接声明的属性
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
    /// 嵌套类（包括伴生对象）
    #[serde(default)]
    pub nested: Vec<ClassDeclaration>,
}

impl ClassDeclaration {
    /// 创建新的类声明
    pub fn new(package: impl Into<String>, relative_name: &str) -> Self {
        let package = package.into();
        let fq_name = if package.is_empty() {
            FqName::new(relative_name)
        } else {
            FqName::new(format!("{package}.{relative_name}"))
        };
        Self {
            fq_name,
            package,
            kind: ClassKind::Class,
            annotations: Vec::new(),
            supertypes: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// 设置声明种类
    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: AnnotationInstance) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// 添加直接父类型
    pub fn with_supertype(mut self, supertype: impl Into<FqName>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// 添加函数
    pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
        self.functions.push(function);
        self
    }

    /// 添加属性
    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    /// 添加嵌套类，嵌套类的名称相对于当前类
    pub fn with_nested(mut self, nested: Self) -> Self {
        self.nested.push(nested);
        self
    }

    /// 添加伴生对象
    pub fn with_companion(self, companion: Self) -> Self {
        self.with_nested(companion.with_kind(ClassKind::CompanionObject))
    }

    /// 简短名称
    pub fn short_name(&self) -> &str {
        self.fq_name.short_name()
    }

    /// 相对于包的类名片段，例如 `Outer.Inner` 对应 `["Outer", "Inner"]`
    pub fn relative_name_segments(&self) -> Vec<&str> {
        let name = self.fq_name.as_str();
        let relative = if self.package.is_empty() {
            name
        } else {
            name.strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(name)
        };
        relative.split('.').collect()
    }

    /// 类自身的类型引用
    pub fn as_type(&self) -> TypeRef {
        TypeRef::class(self.fq_name.clone())
    }

    /// 是否带有给定注解
    pub fn is_annotated_with(&self, fq_name: &FqName) -> bool {
        is_annotated_with(&self.annotations, fq_name)
    }

    /// 附属的伴生对象
    pub fn companion_objects(&self) -> impl Iterator<Item = &Self> {
        self.nested
            .iter()
            .filter(|nested| nested.kind == ClassKind::CompanionObject)
    }
}

impl FunctionDeclaration {
    /// 创建新的函数声明
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            annotations: Vec::new(),
        }
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: AnnotationInstance) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl PropertyDeclaration {
    /// 创建新的属性声明
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            annotations: Vec::new(),
        }
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: AnnotationInstance) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// 一个编译单元内可见的全部声明
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// 模块名称
    #[serde(default)]
    pub module_name: String,
    /// 顶层类声明（保持源码顺序）
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
    /// 编译单元之外的类型的父类型关系
    #[serde(default)]
    pub external_supertypes: BTreeMap<FqName, Vec<FqName>>,
}

impl CompilationUnit {
    /// 创建新的编译单元
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            classes: Vec::new(),
            external_supertypes: BTreeMap::new(),
        }
    }

    /// 添加顶层类
    pub fn with_class(mut self, class: ClassDeclaration) -> Self {
        self.classes.push(class);
        self
    }

    /// 声明外部类型的直接父类型
    pub fn with_external_supertypes(
        mut self,
        type_name: impl Into<FqName>,
        supertypes: Vec<FqName>,
    ) -> Self {
        self.external_supertypes.insert(type_name.into(), supertypes);
        self
    }

    /// 深度优先遍历全部类（顶层类和嵌套类），保持声明顺序
    pub fn all_classes(&self) -> Vec<&ClassDeclaration> {
        fn visit<'a>(class: &'a ClassDeclaration, out: &mut Vec<&'a ClassDeclaration>) {
            out.push(class);
            for nested in &class.nested {
                visit(nested, out);
            }
        }

        let mut classes = Vec::new();
        for class in &self.classes {
            visit(class, &mut classes);
        }
        classes
    }

    /// 与 [`Self::all_classes`] 同序的全部类，附带各自的嵌套路径
    ///
    /// 路径首项是顶层类下标，其后逐级是 `nested` 下标，可交给 [`Self::class_at`] 取回。
    pub fn class_paths(&self) -> Vec<(Vec<usize>, &ClassDeclaration)> {
        fn visit<'a>(
            class: &'a ClassDeclaration,
            path: &mut Vec<usize>,
            out: &mut Vec<(Vec<usize>, &'a ClassDeclaration)>,
        ) {
            out.push((path.clone(), class));
            for (index, nested) in class.nested.iter().enumerate() {
                path.push(index);
                visit(nested, path, out);
                path.pop();
            }
        }

        let mut classes = Vec::new();
        let mut path = Vec::new();
        for (index, class) in self.classes.iter().enumerate() {
            path.push(index);
            visit(class, &mut path, &mut classes);
            path.pop();
        }
        classes
    }

    /// 按嵌套路径取类
    pub fn class_at(&self, path: &[usize]) -> Option<&ClassDeclaration> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.classes.get(*first)?, |class, index| class.nested.get(*index))
    }

    /// 按全限定名查找类
    pub fn find_class(&self, fq_name: &FqName) -> Option<&ClassDeclaration> {
        self.all_classes()
            .into_iter()
            .find(|class| &class.fq_name == fq_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_unit() -> CompilationUnit {
        let outer = ClassDeclaration::new("com.example", "Outer")
            .with_nested(ClassDeclaration::new("com.example", "Outer.Inner"))
            .with_companion(ClassDeclaration::new("com.example", "Outer.Companion"));
        CompilationUnit::new("app")
            .with_class(outer)
            .with_class(ClassDeclaration::new("com.example", "Second"))
    }

    #[test]
    fn test_all_classes_is_depth_first() {
        let unit = nested_unit();
        let names: Vec<&str> = unit
            .all_classes()
            .iter()
            .map(|class| class.fq_name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "com.example.Outer",
                "com.example.Outer.Inner",
                "com.example.Outer.Companion",
                "com.example.Second",
            ]
        );
    }

    #[test]
    fn test_class_paths_resolve_back_to_classes() {
        let unit = nested_unit();
        let paths = unit.class_paths();

        assert_eq!(paths.len(), unit.all_classes().len());
        let recorded: Vec<&[usize]> = paths.iter().map(|(path, _)| path.as_slice()).collect();
        assert_eq!(recorded, [&[0][..], &[0, 0], &[0, 1], &[1]]);
        for (path, class) in &paths {
            let resolved = unit.class_at(path).unwrap();
            assert!(std::ptr::eq(resolved, *class));
        }

        assert!(unit.class_at(&[]).is_none());
        assert!(unit.class_at(&[0, 5]).is_none());
        assert!(unit.class_at(&[2]).is_none());
    }

    #[test]
    fn test_relative_name_segments() {
        let unit = nested_unit();
        let inner = unit
            .find_class(&FqName::new("com.example.Outer.Inner"))
            .unwrap();

        assert_eq!(inner.relative_name_segments(), vec!["Outer", "Inner"]);
        assert_eq!(
            ClassDeclaration::new("", "Root").relative_name_segments(),
            vec!["Root"]
        );
    }

    #[test]
    fn test_companion_objects() {
        let unit = nested_unit();
        let outer = &unit.classes[0];
        let companions: Vec<&str> = outer
            .companion_objects()
            .map(ClassDeclaration::short_name)
            .collect();

        assert_eq!(companions, vec!["Companion"]);
    }

    #[test]
    fn test_deserialize_corpus() {
        let json = r#"{
            "module_name": "app",
            "classes": [{
                "fq_name": "com.example.NetModule",
                "package": "com.example",
                "annotations": [{"fq_name": "dagger.Module"}],
                "properties": [{"name": "client", "type": "okhttp3.OkHttpClient"}]
            }],
            "external_supertypes": {"okhttp3.OkHttpClient": ["kotlin.Any"]}
        }"#;

        let unit: CompilationUnit = serde_json::from_str(json).unwrap();
        let class = &unit.classes[0];

        assert_eq!(class.kind, ClassKind::Class);
        assert!(class.is_annotated_with(&FqName::new("dagger.Module")));
        assert_eq!(class.properties[0].type_ref, TypeRef::class("okhttp3.OkHttpClient"));
        assert_eq!(unit.external_supertypes.len(), 1);
    }
}
