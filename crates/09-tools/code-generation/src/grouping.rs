//! 作用域分组
//!
//! 显式作用域优先；没有显式作用域的记录继承所在模块贡献到的全部默认作用域。
//! 作用域和组内记录都保持首次出现的顺序。

use crate::extractor::ProvisionRecord;
use codegen_abstractions::ScopeFanOut;
use codegen_common::{ElementRef, FqName, GenerationError, GenerationResult};
use tracing::debug;

/// 可以按作用域分组的记录
pub trait Scoped {
    /// 显式作用域
    fn scope(&self) -> Option<&FqName>;

    /// 来源元素
    fn element(&self) -> &ElementRef;
}

impl Scoped for ProvisionRecord {
    fn scope(&self) -> Option<&FqName> {
        self.scope.as_ref()
    }

    fn element(&self) -> &ElementRef {
        &self.element
    }
}

/// 按插入顺序排列的 作用域 → 记录 映射
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeGroups<R> {
    groups: Vec<(FqName, Vec<R>)>,
}

impl<R> ScopeGroups<R> {
    /// 创建空的分组
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// 把记录追加到作用域组，作用域首次出现时创建新组
    pub fn push(&mut self, scope: &FqName, record: R) {
        match self.groups.iter_mut().find(|(existing, _)| existing == scope) {
            Some((_, records)) => records.push(record),
            None => self.groups.push((scope.clone(), vec![record])),
        }
    }

    /// 作用域组数量
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// 是否没有任何组
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 查找作用域组
    pub fn get(&self, scope: &FqName) -> Option<&[R]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == scope)
            .map(|(_, records)| records.as_slice())
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&FqName, &[R])> {
        self.groups
            .iter()
            .map(|(scope, records)| (scope, records.as_slice()))
    }

    /// 按插入顺序列出作用域
    pub fn scopes(&self) -> Vec<&FqName> {
        self.groups.iter().map(|(scope, _)| scope).collect()
    }
}

impl<R> Default for ScopeGroups<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// 去除重复的默认作用域，保留首次出现的顺序
pub fn distinct_scopes(scopes: &[FqName]) -> Vec<FqName> {
    let mut distinct: Vec<FqName> = Vec::with_capacity(scopes.len());
    for scope in scopes {
        if !distinct.contains(scope) {
            distinct.push(scope.clone());
        }
    }
    distinct
}

/// 按作用域分组
///
/// `RequireSingle` 策略下，继承了多个默认作用域的记录返回
/// [`GenerationError::AmbiguousScopeSource`]。
pub fn group<R>(
    records: Vec<R>,
    default_scopes: &[FqName],
    policy: ScopeFanOut,
) -> GenerationResult<ScopeGroups<R>>
where
    R: Scoped + Clone,
{
    let defaults = distinct_scopes(default_scopes);
    let mut groups = ScopeGroups::new();

    for record in records {
        if let Some(scope) = record.scope().cloned() {
            groups.push(&scope, record);
            continue;
        }

        match (defaults.as_slice(), policy) {
            ([], _) => {
                return Err(GenerationError::UnresolvedScope {
                    element: record.element().clone(),
                });
            }
            ([_, _, ..], ScopeFanOut::RequireSingle) => {
                return Err(GenerationError::AmbiguousScopeSource {
                    element: record.element().clone(),
                    scopes: defaults.clone(),
                });
            }
            _ => {
                debug!(
                    "{} 未显式声明作用域，继承默认作用域 {} 个",
                    record.element(),
                    defaults.len()
                );
                for scope in &defaults {
                    groups.push(scope, record.clone());
                }
            }
        }
    }

    Ok(groups)
}
