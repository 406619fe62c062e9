//! # sheath
//!
//! Generates Dagger injector subcomponents for `@ContributesAndroidInjector`
//! functions declared in Kotlin sources.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! codegen   → Generation pipeline (scan, resolve, synthesize, render, emit)
//!   ↓
//! semantic  → FqName/ClassId, SemanticModel trait, SymbolIndex
//!   ↓
//! syntax    → Kotlin declaration tree (KtFile, ClassDecl, TypeRef)
//!   ↓
//! parser    → Logos lexer, recursive-descent declaration parser
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex)
//! ```
//!
//! ## Example
//!
//! ```
//! use sheath::{Generator, GeneratorOptions, MemorySink, SymbolIndex, parse_source};
//!
//! let file = parse_source(
//!     "package app\n\
//!      import dagger.Module\n\
//!      import dagger.android.ContributesAndroidInjector\n\
//!      @Module abstract class Bindings {\n\
//!          @ContributesAndroidInjector abstract fun main(): MainActivity\n\
//!      }\n\
//!      class MainActivity\n",
//! );
//! let files = vec![file];
//! let index = SymbolIndex::from_files(&files);
//! let sink = MemorySink::new();
//! let generated = Generator::new(&index, GeneratorOptions::default())
//!     .generate(&files, &sink)
//!     .unwrap();
//! assert_eq!(generated[0].text.type_name, "Bindings_BindMainActivity");
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → codegen)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent declaration parser
pub mod parser;

/// Syntax: Kotlin declarations, type references, imports
pub mod syntax;

/// Semantic model: qualified names, classifier lookup
pub mod semantic;

/// Injector generation pipeline
pub mod codegen;

/// Project loading: `.kt` sources from disk
pub mod project;

/// Generator options
pub mod config;

/// Fatal generation errors
pub mod error;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the pipeline entry points
pub use codegen::{
    CodeGenSink, DirectorySink, EmittedText, GeneratedFile, Generator, MemorySink, scan,
};
pub use config::GeneratorOptions;
pub use error::{GenerationError, SourceElement};
pub use parser::{ParseError, parse_file, parse_source};
pub use project::{ProjectError, load_sources};
pub use semantic::{ClassId, FqName, SemanticModel, SymbolIndex};
pub use syntax::KtFile;
