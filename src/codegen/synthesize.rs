//! Builds the injector unit for one contribution site.

use tracing::debug;

use super::markers::class_name;
use super::reflect::{AnnotationInstance, copyable, find_marker};
use super::scan::ContributionSite;
use super::types::{AnnotationSpec, ClassName, CodeBlock, TypeArgument, TypeName};
use super::unit::{FileSpec, FunSpec, Modifier, TypeSpec};
use crate::error::{GenerationError, Result, SourceElement};
use crate::semantic::{ClassifierKind, SemanticModel};
use crate::syntax::ClassDecl;

/// Name prefix of everything generated for a class: the enclosing chain
/// joined with `_`, so `Outer.Inner` gives `Outer_Inner`.
pub fn generated_class_name(chain: &[&ClassDecl]) -> String {
    chain
        .iter()
        .map(|class| class.name.as_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// Synthesizes the module and subcomponent for `site`.
///
/// `binding` is the resolved return type of the contribution function and
/// `annotations` every annotation on it, contribution marker included.
/// The binding must name a class. Type parameters and function types are
/// rejected, as are names the model knows to be type aliases.
pub fn synthesize(
    site: &ContributionSite<'_>,
    binding: &TypeName,
    annotations: &[AnnotationInstance],
    model: &dyn SemanticModel,
) -> Result<FileSpec> {
    let template = site.template;
    let binding_class = binding.class_name().filter(|class| {
        model
            .classifier_kind(&class.class_id())
            .is_none_or(ClassifierKind::is_class_like)
    });
    let Some(binding_class) = binding_class else {
        return Err(GenerationError::structural(
            format!(
                "The return type of {} must be a class, found {}",
                site.display_name(),
                site.function
                    .return_type
                    .as_ref()
                    .map(|type_ref| type_ref.text.as_str())
                    .unwrap_or("nothing")
            ),
            Some(SourceElement::new(site.file, site.function.range)),
        ));
    };

    let package = site.file.package.as_str();
    let binding_name = binding_class.simple_name();
    let name = format!(
        "{}{}{}",
        generated_class_name(&site.module),
        template.name_infix,
        binding_name
    );
    debug!("[SYNTHESIZE] {} -> {}.{}", site.display_name(), package, name);

    let outer = ClassName::new(package, &name);
    let component_name = format!("{binding_name}{}", template.component_suffix);
    let component = outer.nested(&component_name);
    let factory = component.nested(template.factory_name);
    let binding_argument = || TypeArgument::invariant(binding.clone());

    let factory_type = TypeSpec::interface(template.factory_name)
        .with_annotation(AnnotationSpec::new(class_name(template.component_factory)))
        .with_supertype(class_name(template.injector_factory).parameterized_by([binding_argument()]));

    let mut component_annotation = AnnotationSpec::new(class_name(template.component));
    if let Some(argument) = find_marker(annotations, site.marker).and_then(|m| m.first_argument()) {
        component_annotation = component_annotation.with_member(CodeBlock::raw(argument));
    }
    let component_type = copyable(annotations, site.marker)
        .into_iter()
        .fold(
            TypeSpec::interface(component_name.as_str()).with_annotation(component_annotation),
            |spec, annotation| spec.with_annotation(annotation.to_spec()),
        )
        .with_supertype(class_name(template.injector).parameterized_by([binding_argument()]))
        .with_type(factory_type);

    let bind_function = FunSpec::new(template.bind_function)
        .with_annotation(AnnotationSpec::new(class_name(template.binds)))
        .with_annotation(AnnotationSpec::new(class_name(template.into_map)))
        .with_annotation(
            AnnotationSpec::new(class_name(template.map_key)).with_member(
                CodeBlock::default()
                    .type_name(binding_class.as_type())
                    .text("::class"),
            ),
        )
        .with_modifier(Modifier::Abstract)
        .with_parameter(template.bind_parameter, factory.as_type())
        .returns(class_name(template.injector_factory).parameterized_by([TypeArgument::Star]));

    let module_type = TypeSpec::class(name.as_str())
        .with_annotation(
            AnnotationSpec::new(class_name(template.module)).with_member(
                CodeBlock::raw("subcomponents = [")
                    .type_name(component.as_type())
                    .text("::class]"),
            ),
        )
        .with_modifier(Modifier::Abstract)
        .with_primary_constructor(vec![Modifier::Private])
        .with_function(bind_function)
        .with_type(component_type);

    Ok(FileSpec::new(package, name).with_type(module_type))
}
