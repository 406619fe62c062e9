//! Syntax: the Kotlin declaration tree handed to the generator.
//!
//! Only declaration-level structure is modelled: headers, classes (nested),
//! functions with their signatures, annotations with raw arguments and type
//! references. Bodies are not represented.

pub mod decl;
pub mod file;
pub mod import;
pub mod types;

pub use decl::{
    AnnotationEntry, ClassDecl, ClassKind, FunctionDecl, TypeAliasDecl, TypeParameter,
    ValueParameter,
};
pub use file::KtFile;
pub use import::{ImportDirective, ImportEntry};
pub use types::{FunctionType, TypeElement, TypeProjection, TypeRef, TypeSegment, UserType, Variance};
