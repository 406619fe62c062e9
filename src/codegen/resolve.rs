//! Type reference resolution.
//!
//! Turns a written type reference into a [`TypeName`] for generated code.
//! Resolution never fails: a reference the model cannot classify, or one
//! naming a type parameter, becomes a placeholder emitted verbatim and any
//! real error is left to the compiler that later reads the generated file.

use smol_str::SmolStr;
use tracing::trace;

use super::markers::{DAGGER_LAZY, JAVAX_PROVIDER};
use super::types::{
    AnnotationSpec, ClassName, CodeBlock, LambdaType, TypeArgument, TypeName,
};
use crate::error::{GenerationError, Result, SourceElement};
use crate::semantic::{LookupScope, SemanticModel};
use crate::syntax::{FunctionDecl, TypeElement, TypeProjection, TypeRef, ValueParameter};

/// Generic wrapper a declared type was unwrapped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapperKind {
    #[default]
    None,
    /// `dagger.Lazy<T>`
    Deferred,
    /// `javax.inject.Provider<T>`
    Repeated,
}

impl WrapperKind {
    fn from_fq_name(fq_name: &str) -> Self {
        match fq_name {
            DAGGER_LAZY => WrapperKind::Deferred,
            JAVAX_PROVIDER => WrapperKind::Repeated,
            _ => WrapperKind::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_name: TypeName,
    pub wrapper: WrapperKind,
}

/// Names visible where a type reference is written: the lookup scope plus
/// the type parameters of the function and its enclosing classes.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    pub lookup: LookupScope<'a>,
    type_parameters: Vec<&'a str>,
}

impl<'a> TypeScope<'a> {
    pub fn new(lookup: LookupScope<'a>, function: Option<&'a FunctionDecl>) -> Self {
        let mut type_parameters: Vec<&'a str> = lookup
            .classes
            .iter()
            .flat_map(|class| class.type_parameters.iter())
            .map(|parameter| parameter.name.as_str())
            .collect();
        if let Some(function) = function {
            type_parameters.extend(function.type_parameters.iter().map(|p| p.name.as_str()));
        }
        Self {
            lookup,
            type_parameters,
        }
    }

    pub fn is_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.contains(&name)
    }
}

/// Resolves `type_ref`, unwrapping one level of `Lazy` / `Provider`.
pub fn resolve(type_ref: &TypeRef, scope: &TypeScope<'_>, model: &dyn SemanticModel) -> ResolvedType {
    if let TypeElement::User(user) = &type_ref.element {
        let wrapper = model
            .resolve_classifier(&scope.lookup, &user.qualified_text())
            .map(|id| WrapperKind::from_fq_name(id.fq_name().as_str()))
            .unwrap_or_default();
        if let (WrapperKind::Deferred | WrapperKind::Repeated, [TypeProjection::Type { type_ref: inner, .. }]) =
            (wrapper, type_ref.type_arguments())
        {
            trace!("[RESOLVE_TYPE] unwrapped {:?} of {}", wrapper, type_ref.text);
            return ResolvedType {
                type_name: resolve_type_name(inner, scope, model),
                wrapper,
            };
        }
    }
    ResolvedType {
        type_name: resolve_type_name(type_ref, scope, model),
        wrapper: WrapperKind::None,
    }
}

/// Resolves `type_ref` as written, without unwrapping.
pub fn resolve_type_name(type_ref: &TypeRef, scope: &TypeScope<'_>, model: &dyn SemanticModel) -> TypeName {
    resolve_element(&type_ref.element, &type_ref.text, scope, model)
}

fn resolve_element(
    element: &TypeElement,
    text: &str,
    scope: &TypeScope<'_>,
    model: &dyn SemanticModel,
) -> TypeName {
    match element {
        TypeElement::Nullable(inner) => {
            let inner_text = text.trim_end().trim_end_matches('?').trim_end();
            resolve_element(inner, inner_text, scope, model).copy_nullable(true)
        }
        TypeElement::Function(function) => TypeName::Lambda(LambdaType {
            receiver: function
                .receiver
                .as_ref()
                .map(|receiver| Box::new(resolve_type_name(receiver, scope, model))),
            parameters: function
                .parameters
                .iter()
                .map(|parameter| resolve_type_name(parameter, scope, model))
                .collect(),
            return_type: Box::new(resolve_type_name(&function.return_type, scope, model)),
            is_suspend: function.is_suspend,
            nullable: false,
            annotations: Vec::new(),
        }),
        TypeElement::User(user) => {
            let placeholder = || TypeName::variable(SmolStr::new(text));

            if user.segments.len() == 1 && scope.is_type_parameter(&user.segments[0].name) {
                trace!("[RESOLVE_TYPE] {} is a type parameter", text);
                return placeholder();
            }
            // Arguments on an outer segment (`Outer<A>.Inner`) are kept verbatim.
            let (last, outer) = match user.segments.split_last() {
                Some(split) => split,
                None => return placeholder(),
            };
            if outer.iter().any(|segment| !segment.arguments.is_empty()) {
                return placeholder();
            }

            let Some(id) = model.resolve_classifier(&scope.lookup, &user.qualified_text()) else {
                trace!("[RESOLVE_TYPE] {} is unresolved", text);
                return placeholder();
            };
            let arguments = last
                .arguments
                .iter()
                .map(|argument| match argument {
                    TypeProjection::Star => TypeArgument::Star,
                    TypeProjection::Type { variance, type_ref } => TypeArgument::Type {
                        variance: *variance,
                        type_name: resolve_type_name(type_ref, scope, model),
                    },
                })
                .collect::<Vec<_>>();
            ClassName::from_class_id(&id).parameterized_by(arguments)
        }
    }
}

/// How a type used as a generic argument is protected from wildcard
/// generation on the JVM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardSuppression {
    None,
    /// `@JvmSuppressWildcards`
    Plain,
    /// `@JvmSuppressWildcards()`, required on function types (KT-31734).
    EmptyMember,
}

impl WildcardSuppression {
    /// Suppression for a declared type: explicit `@JvmSuppressWildcards` or
    /// type arguments call for the plain form, a function type for the
    /// empty-member form.
    pub fn for_type_ref(type_ref: &TypeRef) -> Self {
        let annotated = type_ref.has_annotation_named("JvmSuppressWildcards");
        if annotated || type_ref.is_generic_type() {
            WildcardSuppression::Plain
        } else if type_ref.is_function_type() {
            WildcardSuppression::EmptyMember
        } else {
            WildcardSuppression::None
        }
    }

    pub fn apply(self, type_name: TypeName) -> TypeName {
        let annotation = || AnnotationSpec::new(ClassName::new("kotlin.jvm", "JvmSuppressWildcards"));
        match self {
            WildcardSuppression::None => type_name,
            WildcardSuppression::Plain => type_name.annotated(annotation()),
            WildcardSuppression::EmptyMember => {
                type_name.annotated(annotation().with_member(CodeBlock::raw("")))
            }
        }
    }
}

/// The declared return type of `function`, with wildcard suppression applied.
///
/// Fails when the function declares no return type.
pub fn require_type_name(
    function: &FunctionDecl,
    scope: &TypeScope<'_>,
    model: &dyn SemanticModel,
) -> Result<TypeName> {
    let Some(type_ref) = &function.return_type else {
        return Err(GenerationError::structural(
            format!("Couldn't resolve type of function: {}", function.name),
            Some(SourceElement::new(scope.lookup.file, function.range)),
        ));
    };
    let type_name = resolve_type_name(type_ref, scope, model);
    Ok(WildcardSuppression::for_type_ref(type_ref).apply(type_name))
}

/// A function parameter prepared for provider-style accessor code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// `param<index>`
    pub name: String,
    /// The type with any wrapper removed.
    pub type_name: TypeName,
    /// `Provider<type_name>`
    pub provider_type_name: TypeName,
    /// `Lazy<type_name>`
    pub lazy_type_name: TypeName,
    pub is_wrapped_in_provider: bool,
    pub is_wrapped_in_lazy: bool,
}

impl Parameter {
    /// The type as declared.
    pub fn original_type_name(&self) -> &TypeName {
        if self.is_wrapped_in_provider {
            &self.provider_type_name
        } else if self.is_wrapped_in_lazy {
            &self.lazy_type_name
        } else {
            &self.type_name
        }
    }
}

pub fn map_to_parameters(
    parameters: &[ValueParameter],
    scope: &TypeScope<'_>,
    model: &dyn SemanticModel,
) -> Result<Vec<Parameter>> {
    let provider = ClassName::new("javax.inject", "Provider");
    let lazy = ClassName::new("dagger", "Lazy");

    parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            let Some(type_ref) = &parameter.type_ref else {
                return Err(GenerationError::structural(
                    format!("Couldn't resolve type of parameter: {}", parameter.name),
                    Some(SourceElement::new(scope.lookup.file, parameter.range)),
                ));
            };
            let resolved = resolve(type_ref, scope, model);
            let type_name = WildcardSuppression::for_type_ref(type_ref).apply(resolved.type_name);
            Ok(Parameter {
                name: format!("param{index}"),
                provider_type_name: provider
                    .parameterized_by([TypeArgument::invariant(type_name.clone())]),
                lazy_type_name: lazy.parameterized_by([TypeArgument::invariant(type_name.clone())]),
                type_name,
                is_wrapped_in_provider: resolved.wrapper == WrapperKind::Repeated,
                is_wrapped_in_lazy: resolved.wrapper == WrapperKind::Deferred,
            })
        })
        .collect()
}

/// Comma-separated argument expressions for calling through `parameters`.
///
/// With `as_provider` the parameters are taken to hold providers: a `Lazy`
/// parameter is passed unchanged, every other one is dereferenced with
/// `.get()`. `include_module` prepends the `module` receiver.
pub fn as_argument_list(parameters: &[Parameter], as_provider: bool, include_module: bool) -> String {
    let mut arguments: Vec<String> = parameters
        .iter()
        .map(|parameter| {
            if as_provider && !parameter.is_wrapped_in_lazy {
                format!("{}.get()", parameter.name)
            } else {
                parameter.name.clone()
            }
        })
        .collect();
    if include_module {
        arguments.insert(0, "module".to_string());
    }
    arguments.join(", ")
}
