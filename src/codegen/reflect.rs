//! Annotation reflection: annotation entries resolved to qualified names.

use text_size::TextRange;
use tracing::trace;

use super::markers::MarkerKind;
use super::types::{AnnotationSpec, ClassName, CodeBlock};
use crate::semantic::{ClassId, FqName, LookupScope, SemanticModel};
use crate::syntax::AnnotationEntry;

/// An annotation as written on a declaration, with its name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationInstance {
    pub fq_name: FqName,
    /// `None` when the model could not resolve the written name.
    pub class_id: Option<ClassId>,
    /// Raw text of each argument, in order.
    pub arguments: Vec<String>,
    pub range: TextRange,
}

impl AnnotationInstance {
    pub fn marker(&self) -> Option<MarkerKind> {
        MarkerKind::from_fq_name(self.fq_name.as_str())
    }

    pub fn is_marker(&self, kind: MarkerKind) -> bool {
        self.fq_name.as_str() == kind.fq_name()
    }

    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    pub fn class_name(&self) -> ClassName {
        match &self.class_id {
            Some(id) => ClassName::from_class_id(id),
            None => ClassName::best_guess(self.fq_name.as_str())
                .unwrap_or_else(|| ClassName::new("", self.fq_name.as_str())),
        }
    }

    /// The annotation with its arguments copied verbatim.
    pub fn to_spec(&self) -> AnnotationSpec {
        self.arguments
            .iter()
            .fold(AnnotationSpec::new(self.class_name()), |spec, argument| {
                spec.with_member(CodeBlock::raw(argument.as_str()))
            })
    }
}

pub fn resolve_annotation(
    entry: &AnnotationEntry,
    scope: &LookupScope<'_>,
    model: &dyn SemanticModel,
) -> AnnotationInstance {
    let class_id = model.resolve_classifier(scope, &entry.name);
    let fq_name = match &class_id {
        Some(id) => id.fq_name(),
        None => {
            trace!("[REFLECT] unresolved annotation {}", entry.name);
            FqName::new(entry.name.as_str())
        }
    };
    AnnotationInstance {
        fq_name,
        class_id,
        arguments: entry.arguments.clone(),
        range: entry.range,
    }
}

/// Every annotation of a declaration, in source order.
pub fn reflect(
    annotations: &[AnnotationEntry],
    scope: &LookupScope<'_>,
    model: &dyn SemanticModel,
) -> Vec<AnnotationInstance> {
    annotations
        .iter()
        .map(|entry| resolve_annotation(entry, scope, model))
        .collect()
}

pub fn has_marker(
    annotations: &[AnnotationEntry],
    scope: &LookupScope<'_>,
    model: &dyn SemanticModel,
    kind: MarkerKind,
) -> bool {
    annotations
        .iter()
        .any(|entry| resolve_annotation(entry, scope, model).is_marker(kind))
}

pub fn find_marker(instances: &[AnnotationInstance], kind: MarkerKind) -> Option<&AnnotationInstance> {
    instances.iter().find(|instance| instance.is_marker(kind))
}

/// The annotations forwarded to the generated component: all but the
/// trigger marker.
pub fn copyable(instances: &[AnnotationInstance], trigger: MarkerKind) -> Vec<&AnnotationInstance> {
    instances
        .iter()
        .filter(|instance| !instance.is_marker(trigger))
        .collect()
}
