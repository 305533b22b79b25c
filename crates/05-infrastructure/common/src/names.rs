//! 下游依赖注入容器使用的知名注解和类型名称

use crate::metadata::FqName;
use once_cell::sync::Lazy;

/// `@Module`
pub static DAGGER_MODULE: Lazy<FqName> = Lazy::new(|| FqName::new("dagger.Module"));

/// `@Provides`
pub static DAGGER_PROVIDES: Lazy<FqName> = Lazy::new(|| FqName::new("dagger.Provides"));

/// `@Binds`
pub static DAGGER_BINDS: Lazy<FqName> = Lazy::new(|| FqName::new("dagger.Binds"));

/// `MembersInjector<T>`
pub static DAGGER_MEMBERS_INJECTOR: Lazy<FqName> =
    Lazy::new(|| FqName::new("dagger.MembersInjector"));

/// `@IntoMap`
pub static DAGGER_INTO_MAP: Lazy<FqName> =
    Lazy::new(|| FqName::new("dagger.multibindings.IntoMap"));

/// `@ClassKey`
pub static DAGGER_CLASS_KEY: Lazy<FqName> =
    Lazy::new(|| FqName::new("dagger.multibindings.ClassKey"));

/// `@ContributesTo`，把模块或组件接口贡献到某个作用域
pub static CONTRIBUTES_TO: Lazy<FqName> =
    Lazy::new(|| FqName::new("com.squareup.anvil.annotations.ContributesTo"));

/// 作用域参数的默认哨兵值
pub static KOTLIN_UNIT: Lazy<FqName> = Lazy::new(|| FqName::new("kotlin.Unit"));
