//! 类型层次查询接口
//!
//! 父类型链的解析属于宿主编译器，这里只定义查询接口和传递闭包的遍历。

use codegen_common::FqName;
use std::collections::{HashSet, VecDeque};

/// 宿主提供的类型关系查询
pub trait TypeHierarchy: Send + Sync {
    /// 直接父类型（类和接口）
    fn supertypes_of(&self, type_name: &FqName) -> Vec<FqName>;
}

/// 传递父类型闭包（不含类型自身），按广度优先顺序返回
///
/// 层次中出现环时每个类型只访问一次。
pub fn supertype_closure(hierarchy: &dyn TypeHierarchy, type_name: &FqName) -> Vec<FqName> {
    let mut visited: HashSet<FqName> = HashSet::new();
    let mut closure = Vec::new();
    let mut queue: VecDeque<FqName> = hierarchy.supertypes_of(type_name).into();

    while let Some(current) = queue.pop_front() {
        if &current == type_name || !visited.insert(current.clone()) {
            continue;
        }
        queue.extend(hierarchy.supertypes_of(&current));
        closure.push(current);
    }

    closure
}

/// 判断 `candidate` 是否为 `type_name` 的严格父类型
pub fn is_strict_supertype(
    hierarchy: &dyn TypeHierarchy,
    type_name: &FqName,
    candidate: &FqName,
) -> bool {
    supertype_closure(hierarchy, type_name)
        .iter()
        .any(|supertype| supertype == candidate)
}
