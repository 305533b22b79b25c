//! 约定规范定义
//!
//! 生成声明的命名约定：合成类名、默认提供名和包名转义

use crate::declarations::ClassDeclaration;

/// Kotlin 硬关键字，出现在包名片段中时必须用反引号转义
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// 嵌套类名片段之间的分隔符
pub const NESTED_CLASS_SEPARATOR: &str = "_";

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 合成类名：嵌套类路径用 `_` 连接后加上后缀，例如 `Outer_InnerAndBindsCodeGen`
    pub fn generated_class_name(class: &ClassDeclaration, suffix: &str) -> String {
        let mut name = class
            .relative_name_segments()
            .join(NESTED_CLASS_SEPARATOR);
        name.push_str(suffix);
        name
    }

    /// 类级提供的默认名称：简短类名首字母小写
    pub fn default_provision_name(class: &ClassDeclaration) -> String {
        decapitalize(class.short_name())
    }

    /// 用于 `package` 语句的包名，关键字片段加反引号
    pub fn safe_package_string(package: &str) -> String {
        package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(Self::escape_identifier)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// 与关键字冲突的标识符加反引号
    pub fn escape_identifier(name: &str) -> String {
        if HARD_KEYWORDS.contains(&name) {
            format!("`{name}`")
        } else {
            name.to_string()
        }
    }

    /// 包名对应的相对目录片段
    pub fn package_path_segments(package: &str) -> Vec<&str> {
        package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// 首字母小写
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 验证标识符是否有效
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first_char) = chars.next() else {
        return false;
    };

    // 第一个字符必须是字母或下划线
    if !first_char.is_alphabetic() && first_char != '_' {
        return false;
    }

    // 其余字符必须是字母、数字或下划线
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}
