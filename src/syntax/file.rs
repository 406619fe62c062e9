//! Parsed Kotlin source file.

use std::sync::Arc;

use smol_str::SmolStr;

use super::decl::{ClassDecl, FunctionDecl, TypeAliasDecl};
use super::import::{ImportDirective, ImportEntry};
use crate::base::{FileId, LineCol, LineIndex, TextRange};
use crate::parser::ParseError;

/// One parsed source file. Immutable once built by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KtFile {
    pub file_id: FileId,
    pub path: Arc<str>,
    /// Dotted package name, empty for the default package.
    pub package: SmolStr,
    pub imports: Vec<ImportEntry>,
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
    pub type_aliases: Vec<TypeAliasDecl>,
    pub errors: Vec<ParseError>,
    source: Arc<str>,
    line_index: LineIndex,
}

impl KtFile {
    pub(crate) fn new(file_id: FileId, path: Arc<str>, source: Arc<str>) -> Self {
        let line_index = LineIndex::new(&source);
        Self {
            file_id,
            path,
            package: SmolStr::default(),
            imports: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
            type_aliases: Vec::new(),
            errors: Vec::new(),
            source,
            line_index,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `range`.
    pub fn text(&self, range: TextRange) -> &str {
        &self.source[range]
    }

    pub fn line_col(&self, range: TextRange) -> LineCol {
        self.line_index.line_col(range.start())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn import_directives(&self) -> impl Iterator<Item = &ImportDirective> {
        self.imports.iter().map(|entry| &entry.directive)
    }

    /// Every class of the file, nested ones included, paired with its chain of
    /// enclosing classes (outermost first, the class itself last).
    pub fn classes_and_inner_classes(&self) -> Vec<Vec<&ClassDecl>> {
        fn walk<'a>(
            class: &'a ClassDecl,
            chain: &mut Vec<&'a ClassDecl>,
            out: &mut Vec<Vec<&'a ClassDecl>>,
        ) {
            chain.push(class);
            out.push(chain.clone());
            for nested in &class.classes {
                walk(nested, chain, out);
            }
            chain.pop();
        }

        let mut out = Vec::new();
        let mut chain = Vec::new();
        for class in &self.classes {
            walk(class, &mut chain, &mut out);
        }
        out
    }

    /// Fully qualified name of a class given its enclosing chain.
    pub fn qualified_name(&self, chain: &[&ClassDecl]) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(chain.len() + 1);
        if !self.package.is_empty() {
            segments.push(&self.package);
        }
        segments.extend(chain.iter().map(|class| class.name.as_str()));
        segments.join(".")
    }
}
