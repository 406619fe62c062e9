//! # Injector Generation
//!
//! Turns every `@ContributesAndroidInjector` function declared in a Dagger
//! `@Module` class into a standalone Kotlin unit holding the subcomponent and
//! the module that binds its factory into the injector map.
//!
//! ```text
//! scan        → contribution sites (module class chain + function)
//!   ↓
//! resolve     → binding type of each site      reflect → its annotations
//!   ↓
//! synthesize  → FileSpec (structured unit)
//!   ↓
//! render      → body text + required imports + used names
//!   ↓
//! imports     → merged import list, final text
//!   ↓
//! emit        → CodeGenSink (directory or memory)
//! ```
//!
//! Sites are independent of each other. [`Generator`] runs them on the rayon
//! pool unless [`GeneratorOptions::parallel`] is off, and always returns
//! results in scan order.

pub mod emit;
pub mod imports;
pub mod markers;
pub mod reflect;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod synthesize;
pub mod types;
pub mod unit;

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, warn};

pub use emit::{CodeGenSink, DirectorySink, MemorySink};
pub use imports::{EmittedText, reconcile, reconcile_imports};
pub use markers::{InjectorTemplate, MarkerKind};
pub use reflect::{AnnotationInstance, reflect};
pub use render::{RenderedUnit, render};
pub use resolve::{
    Parameter, ResolvedType, TypeScope, WrapperKind, as_argument_list, map_to_parameters,
    require_type_name, resolve, resolve_type_name,
};
pub use scan::{ContributionSite, scan};
pub use synthesize::{generated_class_name, synthesize};
pub use types::{AnnotationSpec, ClassName, CodeBlock, TypeArgument, TypeName};
pub use unit::{FileSpec, FunSpec, TypeSpec};

use crate::config::GeneratorOptions;
use crate::error::Result;
use crate::semantic::SemanticModel;
use crate::syntax::KtFile;

/// One unit written by [`Generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Where the sink put it.
    pub path: PathBuf,
    pub text: EmittedText,
}

/// Drives the pipeline over a set of parsed files.
pub struct Generator<'m> {
    model: &'m dyn SemanticModel,
    options: GeneratorOptions,
}

impl<'m> Generator<'m> {
    pub fn new(model: &'m dyn SemanticModel, options: GeneratorOptions) -> Self {
        Self { model, options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Builds the text of a single site without emitting it.
    pub fn generate_unit(&self, site: &ContributionSite<'_>) -> Result<EmittedText> {
        debug!("[GENERATE] {}", site.display_name());
        let lookup = site.lookup_scope();
        let scope = TypeScope::new(lookup, Some(site.function));
        let binding = require_type_name(site.function, &scope, self.model)?;
        let annotations = reflect(&site.function.annotations, &scope.lookup, self.model);

        let spec = synthesize(site, &binding, &annotations, self.model)?;
        let rendered = render(&spec, &self.options);
        let source_imports: Vec<_> = site.file.import_directives().cloned().collect();
        Ok(reconcile(&rendered, &source_imports, &self.options))
    }

    /// Generates every site of `files` into `sink`.
    ///
    /// Stops at the first fatal error. Units emitted before it stay in the
    /// sink.
    pub fn generate(&self, files: &[KtFile], sink: &dyn CodeGenSink) -> Result<Vec<GeneratedFile>> {
        for file in files.iter().filter(|file| file.has_errors()) {
            for error in &file.errors {
                let at = file.line_col(error.range);
                warn!(
                    "{}:{}:{}: {}",
                    file.path,
                    at.line + 1,
                    at.col + 1,
                    error.message
                );
            }
        }

        let sites: Vec<ContributionSite<'_>> = scan(files, self.model).collect();
        debug!("[GENERATE] {} contribution site(s)", sites.len());

        let emit_site = |site: &ContributionSite<'_>| -> Result<GeneratedFile> {
            let text = self.generate_unit(site)?;
            let path = sink.emit(&text)?;
            Ok(GeneratedFile { path, text })
        };

        if self.options.parallel {
            sites.par_iter().map(emit_site).collect()
        } else {
            sites.iter().map(emit_site).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use crate::semantic::SymbolIndex;

    const SOURCE: &str = r#"package com.example

import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class ActivityBindings {
    @ContributesAndroidInjector
    abstract fun provideMain(): MainActivity

    @ContributesAndroidInjector
    abstract fun provideSettings(): SettingsActivity
}

class MainActivity
class SettingsActivity
"#;

    #[test]
    fn test_generate_emits_one_unit_per_site_in_order() {
        let files = vec![parse_source(SOURCE)];
        let index = SymbolIndex::from_files(&files);
        let sink = MemorySink::new();
        let generated = Generator::new(&index, GeneratorOptions::default())
            .generate(&files, &sink)
            .expect("generate");

        let names: Vec<_> = generated.iter().map(|g| g.text.type_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["ActivityBindings_BindMainActivity", "ActivityBindings_BindSettingsActivity"]
        );
        assert_eq!(sink.units().len(), 2);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let files = vec![parse_source(SOURCE)];
        let index = SymbolIndex::from_files(&files);

        let parallel = Generator::new(&index, GeneratorOptions::default())
            .generate(&files, &MemorySink::new())
            .expect("parallel");
        let sequential = Generator::new(&index, GeneratorOptions::default().sequential())
            .generate(&files, &MemorySink::new())
            .expect("sequential");
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_generate_unit_does_not_emit() {
        let files = vec![parse_source(SOURCE)];
        let index = SymbolIndex::from_files(&files);
        let generator = Generator::new(&index, GeneratorOptions::default());
        let site = scan(&files, &index).next().expect("site");
        let text = generator.generate_unit(&site).expect("unit");
        assert!(text.content.contains("abstract class ActivityBindings_BindMainActivity private constructor()"));
    }
}
