//! 元数据定义
//!
//! 提供全限定名、类型引用和注解实例等声明元数据

use serde::{Deserialize, Serialize};
use std::fmt;

/// 全限定名（以 `.` 分隔，例如 `com.example.AppScope`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FqName(String);

impl FqName {
    /// 创建新的全限定名
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 字符串形式
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 名称片段
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// 获取简短名称（最后一个片段）
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// 获取父级名称，根级名称返回 `None`
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('.').map(|index| Self(self.0[..index].to_string()))
    }

    /// 检查每个片段是否都是合法标识符
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.segments().all(crate::conventions::is_valid_identifier)
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FqName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 类型参数
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeArgument {
    /// 星投影 `*`
    Star,
    /// 具体类型
    Type(TypeRef),
}

/// 类型引用
///
/// 语料中既可以写成字符串 `"a.b.C"`，也可以写成带类型参数的完整对象。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TypeRefRepr")]
pub struct TypeRef {
    /// 类引用
    pub class: FqName,
    /// 类型参数
    pub arguments: Vec<TypeArgument>,
    /// 是否可空
    pub nullable: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Simple(FqName),
    Full {
        class: FqName,
        #[serde(default)]
        arguments: Vec<TypeArgument>,
        #[serde(default)]
        nullable: bool,
    },
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Simple(class) => Self::class(class),
            TypeRefRepr::Full {
                class,
                arguments,
                nullable,
            } => Self {
                class,
                arguments,
                nullable,
            },
        }
    }
}

impl TypeRef {
    /// 创建无类型参数的类型引用
    pub fn class(class: impl Into<FqName>) -> Self {
        Self {
            class: class.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// 添加类型参数
    pub fn with_argument(mut self, argument: TypeArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// 设置为可空
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (index, argument) in self.arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                match argument {
                    TypeArgument::Star => f.write_str("*")?,
                    TypeArgument::Type(inner) => write!(f, "{inner}")?,
                }
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// 注解参数值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    /// 类字面量 `X::class`
    Class(FqName),
    /// 字符串
    String(String),
    /// 整数
    Int(i64),
    /// 布尔值
    Bool(bool),
    /// 枚举常量
    Enum {
        /// 枚举类型
        class: FqName,
        /// 常量名
        entry: String,
    },
    /// 数组
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    /// 作为类字面量读取
    pub fn as_class(&self) -> Option<&FqName> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// 作为字符串读取
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// 注解参数
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationArgument {
    /// 参数名称，按位置传参时为空
    #[serde(default)]
    pub name: Option<String>,
    /// 参数值
    pub value: AnnotationValue,
}

/// 注解实例
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationInstance {
    /// 注解类型
    pub fq_name: FqName,
    /// 参数列表（保持源码顺序）
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
    /// 注解类型自身携带的元注解（例如 `javax.inject.Qualifier`）
    #[serde(default)]
    pub meta_annotations: Vec<FqName>,
}

impl AnnotationInstance {
    /// 创建无参数的注解实例
    pub fn new(fq_name: impl Into<FqName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            arguments: Vec::new(),
            meta_annotations: Vec::new(),
        }
    }

    /// 添加命名参数
    pub fn with_named(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument {
            name: Some(name.into()),
            value,
        });
        self
    }

    /// 添加位置参数
    pub fn with_positional(mut self, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument { name: None, value });
        self
    }

    /// 添加元注解
    pub fn with_meta_annotation(mut self, fq_name: impl Into<FqName>) -> Self {
        self.meta_annotations.push(fq_name.into());
        self
    }

    /// 按名称查找参数，找不到时退回到指定位置上的位置参数
    pub fn argument_at(&self, name: &str, index: usize) -> Option<&AnnotationValue> {
        self.arguments
            .iter()
            .find(|argument| argument.name.as_deref() == Some(name))
            .or_else(|| {
                self.arguments
                    .get(index)
                    .filter(|argument| argument.name.is_none())
            })
            .map(|argument| &argument.value)
    }

    /// 读取类字面量参数
    pub fn class_argument_at(&self, name: &str, index: usize) -> Option<&FqName> {
        self.argument_at(name, index).and_then(AnnotationValue::as_class)
    }

    /// 读取字符串参数
    pub fn string_argument_at(&self, name: &str, index: usize) -> Option<&str> {
        self.argument_at(name, index)
            .and_then(AnnotationValue::as_string)
    }

    /// 注解类型是否带有给定元注解之一
    pub fn has_meta_annotation<'a>(&self, candidates: impl IntoIterator<Item = &'a FqName>) -> bool {
        candidates
            .into_iter()
            .any(|candidate| self.meta_annotations.contains(candidate))
    }
}

/// 检查注解列表中是否包含给定类型的注解
pub fn is_annotated_with(annotations: &[AnnotationInstance], fq_name: &FqName) -> bool {
    annotations.iter().any(|annotation| &annotation.fq_name == fq_name)
}

/// 元素标识：所属类的全限定名加可选的成员名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef {
    /// 所属类
    pub owner: FqName,
    /// 成员名称，类级元素为空
    pub member: Option<String>,
}

impl ElementRef {
    /// 类级元素
    pub fn class(owner: FqName) -> Self {
        Self {
            owner,
            member: None,
        }
    }

    /// 成员元素
    pub fn member(owner: FqName, member: impl Into<String>) -> Self {
        Self {
            owner,
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}#{}", self.owner, member),
            None => write!(f, "{}", self.owner),
        }
    }
}
