//! Classifiers every index knows without seeing their sources.

use super::model::ClassifierKind;
use ClassifierKind::{AnnotationClass as A, Class as C, Interface as I};

/// Packages whose classes are visible in every Kotlin file without an import.
pub const DEFAULT_IMPORT_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "kotlin.jvm",
    "java.lang",
];

/// `(package, relative name, kind)`
pub const BUILTIN_CLASSIFIERS: &[(&str, &str, ClassifierKind)] = &[
    // kotlin
    ("kotlin", "Any", C),
    ("kotlin", "Unit", ClassifierKind::Object),
    ("kotlin", "Nothing", C),
    ("kotlin", "String", C),
    ("kotlin", "CharSequence", I),
    ("kotlin", "Boolean", C),
    ("kotlin", "Byte", C),
    ("kotlin", "Short", C),
    ("kotlin", "Int", C),
    ("kotlin", "Long", C),
    ("kotlin", "Float", C),
    ("kotlin", "Double", C),
    ("kotlin", "Char", C),
    ("kotlin", "Number", C),
    ("kotlin", "Array", C),
    ("kotlin", "Function", I),
    ("kotlin", "Lazy", I),
    ("kotlin", "Pair", C),
    ("kotlin", "Triple", C),
    ("kotlin", "Enum", C),
    ("kotlin", "Throwable", C),
    ("kotlin", "Suppress", A),
    ("kotlin", "Deprecated", A),
    ("kotlin.annotation", "Retention", A),
    ("kotlin.annotation", "Target", A),
    ("kotlin.annotation", "MustBeDocumented", A),
    ("kotlin.collections", "Iterable", I),
    ("kotlin.collections", "Collection", I),
    ("kotlin.collections", "List", I),
    ("kotlin.collections", "MutableList", I),
    ("kotlin.collections", "Set", I),
    ("kotlin.collections", "MutableSet", I),
    ("kotlin.collections", "Map", I),
    ("kotlin.collections", "MutableMap", I),
    ("kotlin.collections", "ArrayList", C),
    ("kotlin.collections", "HashMap", C),
    ("kotlin.jvm", "JvmSuppressWildcards", A),
    ("kotlin.jvm", "JvmStatic", A),
    ("kotlin.jvm", "JvmField", A),
    ("kotlin.jvm", "JvmName", A),
    ("kotlin.reflect", "KClass", I),
    // dagger
    ("dagger", "Module", A),
    ("dagger", "Binds", A),
    ("dagger", "Provides", A),
    ("dagger", "Lazy", I),
    ("dagger", "Subcomponent", A),
    ("dagger", "Subcomponent.Factory", A),
    ("dagger", "Subcomponent.Builder", A),
    ("dagger", "Component", A),
    ("dagger", "Reusable", A),
    ("dagger.multibindings", "IntoMap", A),
    ("dagger.multibindings", "IntoSet", A),
    ("dagger.multibindings", "ClassKey", A),
    ("dagger.multibindings", "StringKey", A),
    ("dagger.android", "AndroidInjector", I),
    ("dagger.android", "AndroidInjector.Factory", I),
    ("dagger.android", "ContributesAndroidInjector", A),
    ("dagger.android", "DispatchingAndroidInjector", C),
    // javax.inject
    ("javax.inject", "Provider", I),
    ("javax.inject", "Inject", A),
    ("javax.inject", "Named", A),
    ("javax.inject", "Qualifier", A),
    ("javax.inject", "Scope", A),
    ("javax.inject", "Singleton", A),
];

/// True for a package whose members need no import in generated code.
pub fn is_default_import_package(package: &str) -> bool {
    DEFAULT_IMPORT_PACKAGES.contains(&package)
}
