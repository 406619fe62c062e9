//! Type references as written in source.

use smol_str::SmolStr;
use text_size::TextRange;

use super::decl::AnnotationEntry;

/// A type reference: the declared type of a parameter, return value,
/// receiver or type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Annotations written on the type itself, e.g. `@JvmSuppressWildcards`.
    pub annotations: Vec<AnnotationEntry>,
    pub element: TypeElement,
    /// Raw text of the type element, without the leading type annotations.
    pub text: String,
    pub range: TextRange,
}

/// The structural part of a type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeElement {
    /// `a.b.Outer<X>.Inner<Y>`
    User(UserType),
    /// `(A, B) -> C`, `R.() -> C`, `suspend () -> Unit`
    Function(FunctionType),
    /// `T?`
    Nullable(Box<TypeElement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserType {
    pub segments: Vec<TypeSegment>,
}

/// One dot-separated segment of a user type together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSegment {
    pub name: SmolStr,
    pub arguments: Vec<TypeProjection>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeProjection {
    Star,
    Type {
        variance: Option<Variance>,
        type_ref: TypeRef,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    In,
    Out,
}

impl Variance {
    pub fn keyword(self) -> &'static str {
        match self {
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub receiver: Option<Box<TypeRef>>,
    pub parameters: Vec<TypeRef>,
    pub return_type: Box<TypeRef>,
    pub is_suspend: bool,
}

impl TypeRef {
    pub fn is_nullable(&self) -> bool {
        matches!(self.element, TypeElement::Nullable(_))
    }

    /// The element with any nullable wrappers stripped.
    pub fn non_null_element(&self) -> &TypeElement {
        self.element.non_null()
    }

    /// The user type behind this reference, ignoring nullability.
    pub fn user_type(&self) -> Option<&UserType> {
        match self.non_null_element() {
            TypeElement::User(user) => Some(user),
            _ => None,
        }
    }

    /// True when the type carries type arguments, e.g. `Set<String>`.
    pub fn is_generic_type(&self) -> bool {
        self.user_type()
            .is_some_and(|user| user.segments.iter().any(|s| !s.arguments.is_empty()))
    }

    pub fn is_function_type(&self) -> bool {
        matches!(self.non_null_element(), TypeElement::Function(_))
    }

    /// Type arguments of the last segment, the ones `Lazy<T>` and
    /// `Provider<T>` carry.
    pub fn type_arguments(&self) -> &[TypeProjection] {
        self.user_type()
            .and_then(|user| user.segments.last())
            .map(|segment| segment.arguments.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_annotation_named(&self, simple_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|annotation| annotation.short_name() == simple_name)
    }
}

impl TypeElement {
    pub fn non_null(&self) -> &TypeElement {
        match self {
            TypeElement::Nullable(inner) => inner.non_null(),
            other => other,
        }
    }
}

impl UserType {
    /// The referenced name without type arguments, e.g. `a.b.Outer.Inner`.
    pub fn qualified_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].arguments.is_empty()
    }
}
