//! The semantic model seam: classifier lookup for references written in a file.

use super::fq_name::ClassId;
use crate::syntax::{ClassDecl, KtFile};

/// What kind of declaration a classifier name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKind {
    Class,
    Interface,
    Object,
    AnnotationClass,
    EnumClass,
    TypeAlias,
}

impl ClassifierKind {
    pub fn is_class_like(self) -> bool {
        !matches!(self, ClassifierKind::TypeAlias)
    }
}

/// Where a reference is written: its file and the classes enclosing it,
/// outermost first.
#[derive(Debug, Clone, Copy)]
pub struct LookupScope<'a> {
    pub file: &'a KtFile,
    pub classes: &'a [&'a ClassDecl],
}

impl<'a> LookupScope<'a> {
    pub fn new(file: &'a KtFile, classes: &'a [&'a ClassDecl]) -> Self {
        Self { file, classes }
    }

    /// Class ids of the enclosing chain, innermost first.
    pub fn enclosing_class_ids(&self) -> Vec<ClassId> {
        let package = self.file.package.as_str();
        let mut ids = Vec::with_capacity(self.classes.len());
        let mut current: Option<ClassId> = None;
        for class in self.classes {
            let next = match &current {
                Some(outer) => outer.nested(&class.name),
                None => ClassId::new(package, class.name.as_str()),
            };
            ids.push(next.clone());
            current = Some(next);
        }
        ids.reverse();
        ids
    }
}

/// Read-only name resolution shared by every generation task of a run.
pub trait SemanticModel: Send + Sync {
    /// Resolves a possibly dotted classifier reference as written in `scope`.
    fn resolve_classifier(&self, scope: &LookupScope<'_>, name: &str) -> Option<ClassId>;

    /// The kind of a known classifier, `None` if the model has never seen it.
    fn classifier_kind(&self, id: &ClassId) -> Option<ClassifierKind>;
}
