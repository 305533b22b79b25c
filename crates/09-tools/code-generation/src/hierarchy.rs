//! 基于编译单元声明的类型层次

use codegen_abstractions::TypeHierarchy;
use codegen_common::{CompilationUnit, FqName};
use std::collections::HashMap;

/// 由编译单元中的类声明和外部父类型表构建的类型层次
#[derive(Debug, Clone, Default)]
pub struct DeclaredTypeHierarchy {
    edges: HashMap<FqName, Vec<FqName>>,
}

impl DeclaredTypeHierarchy {
    /// 从编译单元构建
    pub fn from_unit(unit: &CompilationUnit) -> Self {
        let mut hierarchy = Self::default();
        for (type_name, supertypes) in &unit.external_supertypes {
            hierarchy.add_edges(type_name, supertypes.iter().cloned());
        }
        for class in unit.all_classes() {
            hierarchy.add_edges(&class.fq_name, class.supertypes.iter().cloned());
        }
        hierarchy
    }

    /// 追加直接父类型
    pub fn add_edges(&mut self, type_name: &FqName, supertypes: impl IntoIterator<Item = FqName>) {
        let entry = self.edges.entry(type_name.clone()).or_default();
        for supertype in supertypes {
            if !entry.contains(&supertype) {
                entry.push(supertype);
            }
        }
    }

    /// 已知类型数量
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// 是否没有任何类型
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl TypeHierarchy for DeclaredTypeHierarchy {
    fn supertypes_of(&self, type_name: &FqName) -> Vec<FqName> {
        self.edges.get(type_name).cloned().unwrap_or_default()
    }
}
