//! Declarations: classes, functions, parameters and the annotations on them.

use smol_str::SmolStr;
use text_size::TextRange;

use super::types::TypeRef;

/// An annotation entry such as `@Named("a")` or `@field:a.b.Qualifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationEntry {
    /// Use-site target, e.g. `field` in `@field:Inject`.
    pub use_site: Option<SmolStr>,
    /// The annotation name as written, possibly dotted.
    pub name: SmolStr,
    /// Raw source text of every value argument, in order.
    pub arguments: Vec<String>,
    pub range: TextRange,
}

impl AnnotationEntry {
    /// Last segment of the written name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    CompanionObject,
    AnnotationClass,
    EnumClass,
}

impl ClassKind {
    pub fn is_object(self) -> bool {
        matches!(self, ClassKind::Object | ClassKind::CompanionObject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: SmolStr,
    pub bound: Option<TypeRef>,
}

/// A class, interface or object, with its nested declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: SmolStr,
    pub kind: ClassKind,
    pub modifiers: Vec<SmolStr>,
    pub annotations: Vec<AnnotationEntry>,
    pub type_parameters: Vec<TypeParameter>,
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
    pub range: TextRange,
    pub name_range: TextRange,
}

impl ClassDecl {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Companion objects declared in this class body.
    pub fn companion_objects(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes
            .iter()
            .filter(|class| class.kind == ClassKind::CompanionObject)
    }

    /// Functions of this class, optionally followed by those of its companion objects.
    pub fn functions(&self, include_companion_objects: bool) -> Vec<&FunctionDecl> {
        let mut functions: Vec<&FunctionDecl> = self.functions.iter().collect();
        if include_companion_objects {
            for companion in self.companion_objects() {
                functions.extend(companion.functions.iter());
            }
        }
        functions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueParameter {
    pub name: SmolStr,
    pub annotations: Vec<AnnotationEntry>,
    pub type_ref: Option<TypeRef>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: SmolStr,
    pub modifiers: Vec<SmolStr>,
    pub annotations: Vec<AnnotationEntry>,
    pub type_parameters: Vec<TypeParameter>,
    pub receiver: Option<TypeRef>,
    pub parameters: Vec<ValueParameter>,
    pub return_type: Option<TypeRef>,
    pub range: TextRange,
    pub name_range: TextRange,
}

impl FunctionDecl {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn is_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.iter().any(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub name: SmolStr,
    pub type_ref: Option<TypeRef>,
    pub range: TextRange,
}
