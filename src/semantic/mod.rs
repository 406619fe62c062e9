//! # Semantic Model
//!
//! Name resolution for references written in Kotlin sources.
//!
//! The generator never asks "what is this expression"; it only needs to know
//! which classifier a type or annotation name denotes. [`SemanticModel`] is
//! that seam. A host compiler can implement it over its own binding context;
//! [`SymbolIndex`] implements it over the parsed files of a project plus a set
//! of well-known external classifiers.

mod builtins;
mod fq_name;
mod index;
mod model;

pub use builtins::{BUILTIN_CLASSIFIERS, DEFAULT_IMPORT_PACKAGES, is_default_import_package};
pub use crate::base::is_identifier;
pub use fq_name::{ClassId, FqName};
pub use index::SymbolIndex;
pub use model::{ClassifierKind, LookupScope, SemanticModel};
