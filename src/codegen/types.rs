//! Type names, annotations and code fragments of the generated-code model.

use smol_str::SmolStr;

use crate::semantic::ClassId;
use crate::syntax::Variance;

/// A class reference in generated code: package plus the chain of simple
/// names from the top-level class down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: SmolStr,
    simple_names: Vec<SmolStr>,
}

impl ClassName {
    pub fn new(package: &str, simple_name: &str) -> Self {
        Self {
            package: SmolStr::new(package),
            simple_names: vec![SmolStr::new(simple_name)],
        }
    }

    pub fn from_class_id(id: &ClassId) -> Self {
        Self {
            package: SmolStr::new(id.package.as_str()),
            simple_names: id.simple_names().into_iter().map(SmolStr::new).collect(),
        }
    }

    pub fn class_id(&self) -> ClassId {
        ClassId::new(self.package.as_str(), self.relative_name().as_str())
    }

    /// `dagger.android.AndroidInjector.Factory` → package `dagger.android`,
    /// names `[AndroidInjector, Factory]`.
    pub fn best_guess(name: &str) -> Option<Self> {
        ClassId::best_guess(name).map(|id| Self::from_class_id(&id))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(SmolStr::as_str).unwrap_or_default()
    }

    pub fn simple_names(&self) -> &[SmolStr] {
        &self.simple_names
    }

    pub fn nested(&self, name: &str) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(SmolStr::new(name));
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
        }
    }

    /// `Outer.Inner`
    pub fn relative_name(&self) -> String {
        self.simple_names.join(".")
    }

    /// `a.b.Outer.Inner`
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }

    pub fn parameterized_by(&self, arguments: impl IntoIterator<Item = TypeArgument>) -> TypeName {
        TypeName::Class(ClassType {
            class: self.clone(),
            arguments: arguments.into_iter().collect(),
            nullable: false,
            annotations: Vec::new(),
        })
    }

    pub fn as_type(&self) -> TypeName {
        self.parameterized_by([])
    }
}

/// A type as written in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Class(ClassType),
    /// A name emitted verbatim: a type parameter or an unresolved reference.
    Variable(TypeVariable),
    Lambda(LambdaType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub class: ClassName,
    pub arguments: Vec<TypeArgument>,
    pub nullable: bool,
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    pub name: SmolStr,
    pub nullable: bool,
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LambdaType {
    pub receiver: Option<Box<TypeName>>,
    pub parameters: Vec<TypeName>,
    pub return_type: Box<TypeName>,
    pub is_suspend: bool,
    pub nullable: bool,
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Star,
    Type {
        variance: Option<Variance>,
        type_name: TypeName,
    },
}

impl TypeArgument {
    pub fn invariant(type_name: TypeName) -> Self {
        TypeArgument::Type {
            variance: None,
            type_name,
        }
    }
}

impl TypeName {
    pub fn variable(name: impl Into<SmolStr>) -> Self {
        TypeName::Variable(TypeVariable {
            name: name.into(),
            nullable: false,
            annotations: Vec::new(),
        })
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeName::Class(class) => class.nullable,
            TypeName::Variable(variable) => variable.nullable,
            TypeName::Lambda(lambda) => lambda.nullable,
        }
    }

    pub fn copy_nullable(mut self, nullable: bool) -> Self {
        match &mut self {
            TypeName::Class(class) => class.nullable = nullable,
            TypeName::Variable(variable) => variable.nullable = nullable,
            TypeName::Lambda(lambda) => lambda.nullable = nullable,
        }
        self
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        match self {
            TypeName::Class(class) => &class.annotations,
            TypeName::Variable(variable) => &variable.annotations,
            TypeName::Lambda(lambda) => &lambda.annotations,
        }
    }

    pub fn annotated(mut self, annotation: AnnotationSpec) -> Self {
        match &mut self {
            TypeName::Class(class) => class.annotations.push(annotation),
            TypeName::Variable(variable) => variable.annotations.push(annotation),
            TypeName::Lambda(lambda) => lambda.annotations.push(annotation),
        }
        self
    }

    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            TypeName::Class(class) => Some(&class.class),
            _ => None,
        }
    }

    /// The bare class, without arguments, nullability or annotations.
    pub fn raw_class(&self) -> Option<TypeName> {
        self.class_name().map(ClassName::as_type)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, TypeName::Variable(_))
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, TypeName::Lambda(_))
    }
}

/// An annotation in generated code. Members are emitted in order, separated
/// by commas, inside parentheses; an annotation with no members has no
/// parentheses, one with a single empty member renders `()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationSpec {
    pub class: ClassName,
    pub members: Vec<CodeBlock>,
}

impl AnnotationSpec {
    pub fn new(class: ClassName) -> Self {
        Self {
            class,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: CodeBlock) -> Self {
        self.members.push(member);
        self
    }
}

/// A fragment of code: raw text interleaved with class references whose
/// rendering depends on the import plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    /// Text copied as-is, typically from the originating source file.
    Raw(String),
    Type(TypeName),
}

impl CodeBlock {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::default().text(text)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(CodePart::Raw(text.into()));
        self
    }

    pub fn type_name(mut self, type_name: TypeName) -> Self {
        self.parts.push(CodePart::Type(type_name));
        self
    }

    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| match part {
            CodePart::Raw(text) => text.is_empty(),
            CodePart::Type(_) => false,
        })
    }
}
