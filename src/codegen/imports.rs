//! Import reconciliation.
//!
//! A generated unit is compiled in the context of the file it came from:
//! copied annotation arguments may name classes only the originating file
//! imports, sometimes through star imports. The unit therefore gets the union
//! of the source file's imports and its own, with ambiguous single-name
//! imports resolved against the qualified names the unit actually uses.
//!
//! Copied imports that clash with another import and are not used by a
//! qualified name are dropped. So are copied imports that would rebind a simple
//! name the body relies on resolving without an import, such as a class of the
//! unit's own package. A class named only inside a string-valued
//! annotation argument is invisible to this check and its import can be lost.

use std::path::PathBuf;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::render::RenderedUnit;
use crate::base::constants::KOTLIN_FILE_EXTENSION;
use crate::base::quote_path;
use crate::config::GeneratorOptions;
use crate::syntax::ImportDirective;

/// Final text of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedText {
    pub package: SmolStr,
    pub type_name: SmolStr,
    /// Destination relative to the output root, e.g. `com/example/Foo.kt`.
    pub relative_path: PathBuf,
    pub content: String,
}

impl EmittedText {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.type_name, KOTLIN_FILE_EXTENSION)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Origin {
    copied: bool,
    required: bool,
}

/// The merged, disambiguated and sorted import list.
pub fn reconcile_imports(rendered: &RenderedUnit, source_imports: &[ImportDirective]) -> Vec<ImportDirective> {
    let mut imports: IndexMap<ImportDirective, Origin> = IndexMap::new();
    for directive in source_imports {
        imports.entry(directive.clone()).or_default().copied = true;
    }
    for directive in &rendered.required_imports {
        imports.entry(directive.clone()).or_default().required = true;
    }

    let mut dropped: Vec<ImportDirective> = Vec::new();
    for (directive, origin) in &imports {
        if !origin.copied || origin.required {
            continue;
        }
        let Some(name) = directive.visible_name() else {
            continue;
        };
        let Some(fq_name) = rendered.implicit_names.get(name) else {
            continue;
        };
        if directive.path.as_str() != fq_name.as_str() {
            trace!("[IMPORTS] {} would rebind {}, dropping it", directive.path, fq_name);
            dropped.push(directive.clone());
        }
    }

    let mut groups: IndexMap<&str, Vec<&ImportDirective>> = IndexMap::new();
    for directive in imports.keys() {
        if dropped.contains(directive) {
            continue;
        }
        if let Some(name) = directive.visible_name() {
            groups.entry(name).or_default().push(directive);
        }
    }

    for (name, members) in groups.iter().filter(|(_, members)| members.len() > 1) {
        let used: Vec<&&ImportDirective> = members
            .iter()
            .filter(|directive| rendered.uses(&directive.path))
            .collect();
        if let [keep] = used.as_slice() {
            trace!("[IMPORTS] {} is ambiguous, keeping {}", name, keep.path);
            dropped.extend(
                members
                    .iter()
                    .filter(|directive| **directive != **keep)
                    .map(|directive| (*directive).clone()),
            );
        } else {
            trace!("[IMPORTS] {} is ambiguous, dropping copied imports", name);
            dropped.extend(
                members
                    .iter()
                    .filter(|directive| {
                        let origin = imports[**directive];
                        origin.copied && !origin.required
                    })
                    .map(|directive| (*directive).clone()),
            );
        }
    }

    let mut result: Vec<ImportDirective> = imports
        .into_keys()
        .filter(|directive| !dropped.contains(directive))
        .collect();
    result.sort_by_key(ImportDirective::text);
    result
}

/// Assembles the final file: marker comment, package line, imports, body.
pub fn reconcile(
    rendered: &RenderedUnit,
    source_imports: &[ImportDirective],
    options: &GeneratorOptions,
) -> EmittedText {
    let imports = reconcile_imports(rendered, source_imports);

    let mut content = options.header();
    if !rendered.package.is_empty() {
        content.push_str(&format!("package {}\n\n", quote_path(&rendered.package)));
    }
    if !imports.is_empty() {
        for directive in &imports {
            content.push_str(&directive.text());
            content.push('\n');
        }
        content.push('\n');
    }
    content.push_str(&rendered.body);

    let mut relative_path: PathBuf = rendered.package.split('.').filter(|s| !s.is_empty()).collect();
    relative_path.push(format!("{}.{}", rendered.name, KOTLIN_FILE_EXTENSION));

    EmittedText {
        package: rendered.package.clone(),
        type_name: rendered.name.clone(),
        relative_path,
        content,
    }
}
