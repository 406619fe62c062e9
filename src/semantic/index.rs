//! Project-wide classifier index.
//!
//! The index knows every class, object, interface and type alias declared in
//! the parsed files plus a set of registered external classifiers (the
//! builtins of [`super::builtins`] and anything a host adds). It answers
//! [`SemanticModel`] queries with Kotlin's lookup order:
//!
//! 1. classes nested in the enclosing class chain, innermost first
//! 2. explicit imports, alias-aware (trusted even when the target is unknown)
//! 3. the file's own package
//! 4. star imports
//! 5. default-imported packages (`kotlin.*`, `kotlin.collections.*`, ...)

use rustc_hash::FxHashMap;
use tracing::trace;

use super::builtins::{BUILTIN_CLASSIFIERS, DEFAULT_IMPORT_PACKAGES};
use super::fq_name::{ClassId, FqName};
use super::model::{ClassifierKind, LookupScope, SemanticModel};
use crate::syntax::{ClassDecl, ClassKind, KtFile};

#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    /// FqName → (ClassId, kind)
    classifiers: FxHashMap<FqName, (ClassId, ClassifierKind)>,
}

impl SymbolIndex {
    /// An empty index without builtins.
    pub fn new() -> Self {
        Self::default()
    }

    /// An index pre-populated with the builtin Kotlin, Dagger and javax names.
    pub fn with_builtins() -> Self {
        let mut index = Self::new();
        for (package, relative_name, kind) in BUILTIN_CLASSIFIERS {
            index.register(ClassId::new(*package, *relative_name), *kind);
        }
        index
    }

    /// Builtins plus every declaration of `files`.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a KtFile>) -> Self {
        let mut index = Self::with_builtins();
        for file in files {
            index.add_file(file);
        }
        index
    }

    pub fn register(&mut self, id: ClassId, kind: ClassifierKind) {
        self.classifiers.insert(id.fq_name(), (id, kind));
    }

    pub fn add_file(&mut self, file: &KtFile) {
        fn walk(index: &mut SymbolIndex, class: &ClassDecl, id: ClassId) {
            for nested in &class.classes {
                walk(index, nested, id.nested(&nested.name));
            }
            index.register(id, classifier_kind(class.kind));
        }

        let package = file.package.as_str();
        for class in &file.classes {
            walk(self, class, ClassId::new(package, class.name.as_str()));
        }
        for alias in &file.type_aliases {
            self.register(
                ClassId::new(package, alias.name.as_str()),
                ClassifierKind::TypeAlias,
            );
        }
    }

    pub fn lookup(&self, fq_name: &FqName) -> Option<&ClassId> {
        self.classifiers.get(fq_name).map(|(id, _)| id)
    }

    pub fn contains(&self, id: &ClassId) -> bool {
        self.classifiers.contains_key(&id.fq_name())
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    fn known(&self, id: ClassId) -> Option<ClassId> {
        self.contains(&id).then_some(id)
    }

    fn resolve_simple(&self, scope: &LookupScope<'_>, name: &str) -> Option<ClassId> {
        // 1. nested in the enclosing chain
        for enclosing in scope.enclosing_class_ids() {
            if let Some(id) = self.known(enclosing.nested(name)) {
                trace!("[RESOLVE] {} -> nested {}", name, id);
                return Some(id);
            }
        }

        // 2. explicit imports
        for directive in scope.file.import_directives() {
            if directive.visible_name() != Some(name) {
                continue;
            }
            let fq_name = FqName::new(directive.path.as_str());
            let id = self
                .lookup(&fq_name)
                .cloned()
                .or_else(|| ClassId::best_guess(&directive.path));
            if let Some(id) = id {
                trace!("[RESOLVE] {} -> import {}", name, id);
                return Some(id);
            }
        }

        // 3. same package
        if let Some(id) = self.known(ClassId::new(scope.file.package.as_str(), name)) {
            trace!("[RESOLVE] {} -> package {}", name, id);
            return Some(id);
        }

        // 4. star imports
        for directive in scope.file.import_directives().filter(|d| d.is_star) {
            let fq_name = FqName::new(directive.path.as_str()).child(name);
            if let Some(id) = self.lookup(&fq_name) {
                trace!("[RESOLVE] {} -> star import {}", name, id);
                return Some(id.clone());
            }
        }

        // 5. default imports
        for package in DEFAULT_IMPORT_PACKAGES {
            if let Some(id) = self.known(ClassId::new(*package, name)) {
                trace!("[RESOLVE] {} -> default import {}", name, id);
                return Some(id);
            }
        }

        None
    }
}

impl SemanticModel for SymbolIndex {
    fn resolve_classifier(&self, scope: &LookupScope<'_>, name: &str) -> Option<ClassId> {
        let mut segments = name.split('.');
        let first = segments.next()?;
        let rest: Vec<&str> = segments.collect();

        if let Some(mut id) = self.resolve_simple(scope, first) {
            for segment in &rest {
                id = id.nested(segment);
            }
            return Some(id);
        }
        if rest.is_empty() {
            trace!("[RESOLVE] {} -> unresolved", name);
            return None;
        }

        let fq_name = FqName::new(name);
        if let Some(id) = self.lookup(&fq_name) {
            return Some(id.clone());
        }
        let guess = ClassId::best_guess(name);
        trace!("[RESOLVE] {} -> best guess {:?}", name, guess);
        guess
    }

    fn classifier_kind(&self, id: &ClassId) -> Option<ClassifierKind> {
        self.classifiers.get(&id.fq_name()).map(|(_, kind)| *kind)
    }
}

fn classifier_kind(kind: ClassKind) -> ClassifierKind {
    match kind {
        ClassKind::Class => ClassifierKind::Class,
        ClassKind::Interface => ClassifierKind::Interface,
        ClassKind::Object | ClassKind::CompanionObject => ClassifierKind::Object,
        ClassKind::AnnotationClass => ClassifierKind::AnnotationClass,
        ClassKind::EnumClass => ClassifierKind::EnumClass,
    }
}
