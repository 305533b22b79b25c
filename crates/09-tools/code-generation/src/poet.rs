//! Kotlin 源码模型
//!
//! 合成器用这里的规格对象描述生成的接口，[`FileSpec::render`] 把它们渲染成
//! 宿主编译器可以直接编译的文本。规格对象在一次所属类调用中构建，
//! 构建完成后不再修改；渲染是纯函数，相同的输入总是得到逐字节相同的输出。

use codegen_common::{
    AnnotationInstance, AnnotationValue, FqName, NamingConventions, TypeArgument, TypeRef,
};
use std::collections::{BTreeMap, BTreeSet};

const INDENT: &str = "  ";

/// 无需导入即可按简短名称使用的包
const DEFAULT_IMPORT_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

/// 类型名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// 类类型，可带类型参数
    Class {
        /// 类的全限定名
        name: FqName,
        /// 类型参数
        arguments: Vec<TypeName>,
        /// 是否可空
        nullable: bool,
    },
    /// 星投影 `*`
    Star,
}

impl TypeName {
    /// 无类型参数的类类型
    pub fn class(name: impl Into<FqName>) -> Self {
        Self::Class {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// 以给定类型参数参数化
    pub fn parameterized_by(self, parameters: Vec<Self>) -> Self {
        match self {
            Self::Class { name, nullable, .. } => Self::Class {
                name,
                arguments: parameters,
                nullable,
            },
            Self::Star => Self::Star,
        }
    }

    fn is_nullable(&self) -> bool {
        matches!(self, Self::Class { nullable: true, .. })
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        if let Self::Class {
            name, arguments, ..
        } = self
        {
            out.insert(name.clone());
            for argument in arguments {
                argument.collect_names(out);
            }
        }
    }

    fn render(&self, names: &NameResolver) -> String {
        match self {
            Self::Star => "*".to_string(),
            Self::Class {
                name,
                arguments,
                nullable,
            } => {
                let mut rendered = names.name(name);
                if !arguments.is_empty() {
                    let arguments: Vec<String> =
                        arguments.iter().map(|a| a.render(names)).collect();
                    rendered.push('<');
                    rendered.push_str(&arguments.join(", "));
                    rendered.push('>');
                }
                if *nullable {
                    rendered.push('?');
                }
                rendered
            }
        }
    }
}

impl From<&TypeRef> for TypeName {
    fn from(type_ref: &TypeRef) -> Self {
        Self::Class {
            name: type_ref.class.clone(),
            arguments: type_ref
                .arguments
                .iter()
                .map(|argument| match argument {
                    TypeArgument::Star => Self::Star,
                    TypeArgument::Type(inner) => Self::from(inner),
                })
                .collect(),
            nullable: type_ref.nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CodePart {
    Literal(String),
    Type(FqName),
}

/// 可引用类型的代码片段（导入由渲染时统一处理）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

impl CodeBlock {
    /// 纯文本片段
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            parts: vec![CodePart::Literal(text.into())],
        }
    }

    /// 类字面量 `X::class`
    pub fn class_literal(name: &FqName) -> Self {
        Self {
            parts: vec![
                CodePart::Type(name.clone()),
                CodePart::Literal("::class".to_string()),
            ],
        }
    }

    /// 注解参数值
    pub fn annotation_value(value: &AnnotationValue) -> Self {
        match value {
            AnnotationValue::Class(name) => Self::class_literal(name),
            AnnotationValue::String(text) => Self::literal(quote_string(text)),
            AnnotationValue::Int(number) => Self::literal(number.to_string()),
            AnnotationValue::Bool(flag) => Self::literal(flag.to_string()),
            AnnotationValue::Enum { class, entry } => Self {
                parts: vec![
                    CodePart::Type(class.clone()),
                    CodePart::Literal(format!(".{entry}")),
                ],
            },
            AnnotationValue::Array(values) => {
                let mut block = Self::literal("[");
                for (index, inner) in values.iter().enumerate() {
                    if index > 0 {
                        block = block.append(Self::literal(", "));
                    }
                    block = block.append(Self::annotation_value(inner));
                }
                block.append(Self::literal("]"))
            }
        }
    }

    /// 拼接另一个片段
    pub fn append(mut self, other: Self) -> Self {
        self.parts.extend(other.parts);
        self
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        for part in &self.parts {
            if let CodePart::Type(name) = part {
                out.insert(name.clone());
            }
        }
    }

    fn render(&self, names: &NameResolver) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                CodePart::Literal(text) => text.clone(),
                CodePart::Type(name) => names.name(name),
            })
            .collect()
    }
}

/// 注解使用处目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSiteTarget {
    /// 属性的 getter（`@get:`）
    Get,
    /// 扩展属性的接收者参数（`@receiver:`）
    Receiver,
}

impl UseSiteTarget {
    fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Receiver => "receiver",
        }
    }
}

/// 注解规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    type_name: FqName,
    members: Vec<CodeBlock>,
    use_site: Option<UseSiteTarget>,
}

impl AnnotationSpec {
    /// 创建注解规格
    pub fn builder(type_name: &FqName) -> Self {
        Self {
            type_name: type_name.clone(),
            members: Vec::new(),
            use_site: None,
        }
    }

    /// 原样复制源码中的注解实例
    pub fn from_instance(annotation: &AnnotationInstance) -> Self {
        let members = annotation
            .arguments
            .iter()
            .map(|argument| {
                let value = CodeBlock::annotation_value(&argument.value);
                match &argument.name {
                    Some(name) => CodeBlock::literal(format!("{name} = ")).append(value),
                    None => value,
                }
            })
            .collect();
        Self {
            type_name: annotation.fq_name.clone(),
            members,
            use_site: None,
        }
    }

    /// 添加参数
    pub fn add_member(mut self, member: CodeBlock) -> Self {
        self.members.push(member);
        self
    }

    /// 设置使用处目标
    pub fn use_site_target(mut self, target: UseSiteTarget) -> Self {
        self.use_site = Some(target);
        self
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        out.insert(self.type_name.clone());
        for member in &self.members {
            member.collect_names(out);
        }
    }

    fn render(&self, names: &NameResolver) -> String {
        let mut rendered = String::from("@");
        if let Some(target) = self.use_site {
            rendered.push_str(target.keyword());
            rendered.push(':');
        }
        rendered.push_str(&names.name(&self.type_name));
        if !self.members.is_empty() {
            let members: Vec<String> = self.members.iter().map(|m| m.render(names)).collect();
            rendered.push('(');
            rendered.push_str(&members.join(", "));
            rendered.push(')');
        }
        rendered
    }
}

/// 抽象属性规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    name: String,
    type_name: TypeName,
    receiver: Option<TypeName>,
    annotations: Vec<AnnotationSpec>,
}

impl PropertySpec {
    /// 创建属性规格
    pub fn builder(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
            receiver: None,
            annotations: Vec::new(),
        }
    }

    /// 设置扩展接收者类型
    pub fn receiver(mut self, receiver: TypeName) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// 添加注解
    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        self.type_name.collect_names(out);
        if let Some(receiver) = &self.receiver {
            receiver.collect_names(out);
        }
        for annotation in &self.annotations {
            annotation.collect_names(out);
        }
    }

    fn render(&self, names: &NameResolver, out: &mut Vec<String>) {
        for annotation in &self.annotations {
            out.push(annotation.render(names));
        }
        out.push(format!(
            "public val {}{}: {}",
            render_receiver(self.receiver.as_ref(), names),
            NamingConventions::escape_identifier(&self.name),
            self.type_name.render(names)
        ));
    }
}

/// 抽象函数规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunSpec {
    name: String,
    receiver: Option<TypeName>,
    return_type: Option<TypeName>,
    annotations: Vec<AnnotationSpec>,
}

impl FunSpec {
    /// 创建函数规格
    pub fn builder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            return_type: None,
            annotations: Vec::new(),
        }
    }

    /// 设置扩展接收者类型
    pub fn receiver(mut self, receiver: TypeName) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// 设置返回类型（默认 `Unit`，不渲染）
    pub fn returns(mut self, return_type: TypeName) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// 添加注解
    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        for type_name in self.receiver.iter().chain(self.return_type.iter()) {
            type_name.collect_names(out);
        }
        for annotation in &self.annotations {
            annotation.collect_names(out);
        }
    }

    fn render(&self, names: &NameResolver, out: &mut Vec<String>) {
        for annotation in &self.annotations {
            out.push(annotation.render(names));
        }
        let return_type = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.render(names)))
            .unwrap_or_default();
        out.push(format!(
            "public fun {}{}(){}",
            render_receiver(self.receiver.as_ref(), names),
            NamingConventions::escape_identifier(&self.name),
            return_type
        ));
    }
}

/// 接口规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    name: String,
    annotations: Vec<AnnotationSpec>,
    properties: Vec<PropertySpec>,
    functions: Vec<FunSpec>,
}

impl TypeSpec {
    /// 创建接口规格
    pub fn interface_builder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// 接口名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 添加注解
    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// 添加属性
    pub fn add_property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    /// 添加函数
    pub fn add_function(mut self, function: FunSpec) -> Self {
        self.functions.push(function);
        self
    }

    fn collect_names(&self, out: &mut BTreeSet<FqName>) {
        for annotation in &self.annotations {
            annotation.collect_names(out);
        }
        for property in &self.properties {
            property.collect_names(out);
        }
        for function in &self.functions {
            function.collect_names(out);
        }
    }

    fn render(&self, names: &NameResolver) -> String {
        let mut rendered = String::new();
        for annotation in &self.annotations {
            rendered.push_str(&annotation.render(names));
            rendered.push('\n');
        }
        rendered.push_str("public interface ");
        rendered.push_str(&NamingConventions::escape_identifier(&self.name));

        let mut members: Vec<Vec<String>> = Vec::new();
        for property in &self.properties {
            let mut lines = Vec::new();
            property.render(names, &mut lines);
            members.push(lines);
        }
        for function in &self.functions {
            let mut lines = Vec::new();
            function.render(names, &mut lines);
            members.push(lines);
        }

        if members.is_empty() {
            rendered.push('\n');
            return rendered;
        }

        rendered.push_str(" {\n");
        for (index, lines) in members.iter().enumerate() {
            if index > 0 {
                rendered.push('\n');
            }
            for line in lines {
                rendered.push_str(INDENT);
                rendered.push_str(line);
                rendered.push('\n');
            }
        }
        rendered.push_str("}\n");
        rendered
    }
}

/// 文件规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    package: String,
    name: String,
    types: Vec<TypeSpec>,
}

impl FileSpec {
    /// 创建文件规格
    pub fn builder(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// 添加顶层接口
    pub fn add_type(mut self, type_spec: TypeSpec) -> Self {
        self.types.push(type_spec);
        self
    }

    /// 包名
    pub fn package(&self) -> &str {
        &self.package
    }

    /// 文件名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 顶层接口
    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// 渲染为源码文本
    pub fn render(&self) -> String {
        let mut referenced = BTreeSet::new();
        for type_spec in &self.types {
            type_spec.collect_names(&mut referenced);
        }
        let names = NameResolver::new(&self.package, &referenced);

        let mut rendered = String::new();
        if !self.package.is_empty() {
            rendered.push_str("package ");
            rendered.push_str(&NamingConventions::safe_package_string(&self.package));
            rendered.push_str("\n\n");
        }

        if !names.imports.is_empty() {
            for import in &names.imports {
                rendered.push_str("import ");
                rendered.push_str(&escape_qualified(import));
                rendered.push('\n');
            }
            rendered.push('\n');
        }

        let types: Vec<String> = self.types.iter().map(|t| t.render(&names)).collect();
        rendered.push_str(&types.join("\n"));
        rendered
    }
}

/// 决定每个被引用的类型以简短名称还是全限定名称出现
struct NameResolver {
    simple_names: BTreeMap<FqName, String>,
    imports: Vec<FqName>,
}

impl NameResolver {
    fn new(package: &str, referenced: &BTreeSet<FqName>) -> Self {
        let mut claimed: BTreeMap<String, FqName> = BTreeMap::new();
        let mut simple_names = BTreeMap::new();
        let mut imports = Vec::new();

        for name in referenced {
            let short = name.short_name().to_string();
            if claimed.contains_key(&short) {
                // 简短名称已被另一个类型占用，保持全限定
                continue;
            }
            claimed.insert(short.clone(), name.clone());
            simple_names.insert(name.clone(), NamingConventions::escape_identifier(&short));

            let needs_import = name.parent().is_some_and(|parent| {
                parent.as_str() != package && !DEFAULT_IMPORT_PACKAGES.contains(&parent.as_str())
            });
            if needs_import {
                imports.push(name.clone());
            }
        }

        Self {
            simple_names,
            imports,
        }
    }

    fn name(&self, name: &FqName) -> String {
        self.simple_names
            .get(name)
            .cloned()
            .unwrap_or_else(|| escape_qualified(name))
    }
}

fn render_receiver(receiver: Option<&TypeName>, names: &NameResolver) -> String {
    match receiver {
        Some(receiver) if receiver.is_nullable() => format!("({}).", receiver.render(names)),
        Some(receiver) => format!("{}.", receiver.render(names)),
        None => String::new(),
    }
}

fn escape_qualified(name: &FqName) -> String {
    name.segments()
        .map(NamingConventions::escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
