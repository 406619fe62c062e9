//! The synthesized compilation unit: a file holding type declarations.

use smol_str::SmolStr;

use super::types::{AnnotationSpec, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Private,
    Abstract,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Dotted package, empty for the default package.
    pub package: SmolStr,
    /// File name without extension; also the name of the main type.
    pub name: SmolStr,
    pub types: Vec<TypeSpec>,
}

impl FileSpec {
    pub fn new(package: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_spec: TypeSpec) -> Self {
        self.types.push(type_spec);
        self
    }
}

/// A class or interface declaration. Functions are emitted before nested types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: SmolStr,
    pub kind: TypeKind,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    /// Modifiers of an empty primary constructor, e.g. `private constructor()`.
    pub primary_constructor: Option<Vec<Modifier>>,
    pub supertypes: Vec<TypeName>,
    pub functions: Vec<FunSpec>,
    pub types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn new(kind: TypeKind, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            primary_constructor: None,
            supertypes: Vec::new(),
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_primary_constructor(mut self, modifiers: Vec<Modifier>) -> Self {
        self.primary_constructor = Some(modifiers);
        self
    }

    pub fn with_supertype(mut self, supertype: TypeName) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_function(mut self, function: FunSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_type(mut self, nested: TypeSpec) -> Self {
        self.types.push(nested);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.types.is_empty()
    }
}

/// A bodiless function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunSpec {
    pub name: SmolStr,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub parameters: Vec<ParameterSpec>,
    pub return_type: Option<TypeName>,
}

impl FunSpec {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<SmolStr>, type_name: TypeName) -> Self {
        self.parameters.push(ParameterSpec {
            name: name.into(),
            type_name,
        });
        self
    }

    pub fn returns(mut self, type_name: TypeName) -> Self {
        self.return_type = Some(type_name);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: SmolStr,
    pub type_name: TypeName,
}
