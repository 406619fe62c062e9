//! Serializes a [`FileSpec`] to Kotlin source.
//!
//! Rendering happens in two steps. The model is walked first to collect every
//! class it references; from those the renderer decides which classes get an
//! import and which must be written fully qualified. The body is then written
//! without an import block. The returned [`RenderedUnit`] carries the imports
//! the body needs and the set of qualified names it uses, which is what
//! [`super::imports::reconcile`] works from.

use std::fmt::Write;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::types::{AnnotationSpec, ClassName, CodeBlock, CodePart, TypeArgument, TypeName};
use super::unit::{FileSpec, FunSpec, Modifier, TypeSpec};
use crate::base::{quote, quote_path};
use crate::config::GeneratorOptions;
use crate::parser::{TokenKind, tokenize};
use crate::semantic::is_default_import_package;
use crate::syntax::ImportDirective;

/// A serialized unit before import reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub package: SmolStr,
    pub name: SmolStr,
    /// Declarations, starting right after the import block.
    pub body: String,
    /// Imports the body needs, in first-reference order.
    pub required_imports: Vec<ImportDirective>,
    /// Every qualified name the body refers to.
    pub usages: IndexSet<String>,
    /// Simple names the body relies on without an import, with the canonical
    /// name of the class each one must keep denoting.
    pub implicit_names: IndexMap<SmolStr, String>,
}

impl RenderedUnit {
    pub fn uses(&self, fq_name: &str) -> bool {
        self.usages.contains(fq_name)
    }
}

pub fn render(file: &FileSpec, options: &GeneratorOptions) -> RenderedUnit {
    let mut collector = ClassCollector::default();
    for type_spec in &file.types {
        collector.visit_type(type_spec);
    }

    let plan = ImportPlan::new(file, &collector.classes);

    let mut usages = IndexSet::new();
    for class in &collector.classes {
        usages.insert(class.top_level().canonical_name());
        usages.insert(class.canonical_name());
    }
    for fragment in &collector.raw_fragments {
        usages.extend(dotted_names(fragment));
    }

    let mut writer = Writer {
        output: String::new(),
        indent_level: 0,
        options,
        plan: &plan,
    };
    for (index, type_spec) in file.types.iter().enumerate() {
        if index > 0 {
            writer.write_blank_line();
        }
        writer.write_type(type_spec);
    }

    RenderedUnit {
        package: file.package.clone(),
        name: file.name.clone(),
        body: writer.output,
        required_imports: plan.imports,
        usages,
        implicit_names: plan.implicit,
    }
}

/// Dotted names (at least two segments) appearing in a code fragment.
fn dotted_names(fragment: &str) -> Vec<String> {
    let tokens: Vec<_> = tokenize(fragment)
        .into_iter()
        .filter(|token| !token.is_trivia())
        .collect();

    let mut names = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind != TokenKind::Ident {
            i += 1;
            continue;
        }
        let mut segments = vec![tokens[i].name()];
        while i + 2 < tokens.len()
            && tokens[i + 1].kind == TokenKind::Dot
            && tokens[i + 2].kind == TokenKind::Ident
        {
            segments.push(tokens[i + 2].name());
            i += 2;
        }
        if segments.len() > 1 {
            names.push(segments.join("."));
        }
        i += 1;
    }
    names
}

// ============================================================
// Collection
// ============================================================

#[derive(Default)]
struct ClassCollector<'a> {
    classes: IndexSet<ClassName>,
    raw_fragments: Vec<&'a str>,
}

impl<'a> ClassCollector<'a> {
    fn visit_type(&mut self, type_spec: &'a TypeSpec) {
        self.visit_annotations(&type_spec.annotations);
        for supertype in &type_spec.supertypes {
            self.visit_type_name(supertype);
        }
        for function in &type_spec.functions {
            self.visit_function(function);
        }
        for nested in &type_spec.types {
            self.visit_type(nested);
        }
    }

    fn visit_function(&mut self, function: &'a FunSpec) {
        self.visit_annotations(&function.annotations);
        for parameter in &function.parameters {
            self.visit_type_name(&parameter.type_name);
        }
        if let Some(return_type) = &function.return_type {
            self.visit_type_name(return_type);
        }
    }

    fn visit_annotations(&mut self, annotations: &'a [AnnotationSpec]) {
        for annotation in annotations {
            self.classes.insert(annotation.class.clone());
            for member in &annotation.members {
                self.visit_code(member);
            }
        }
    }

    fn visit_code(&mut self, code: &'a CodeBlock) {
        for part in code.parts() {
            match part {
                CodePart::Raw(text) => self.raw_fragments.push(text),
                CodePart::Type(type_name) => self.visit_type_name(type_name),
            }
        }
    }

    fn visit_type_name(&mut self, type_name: &'a TypeName) {
        self.visit_annotations(type_name.annotations());
        match type_name {
            TypeName::Class(class) => {
                self.classes.insert(class.class.clone());
                for argument in &class.arguments {
                    if let TypeArgument::Type { type_name, .. } = argument {
                        self.visit_type_name(type_name);
                    }
                }
            }
            TypeName::Variable(_) => {}
            TypeName::Lambda(lambda) => {
                if let Some(receiver) = &lambda.receiver {
                    self.visit_type_name(receiver);
                }
                for parameter in &lambda.parameters {
                    self.visit_type_name(parameter);
                }
                self.visit_type_name(&lambda.return_type);
            }
        }
    }
}

// ============================================================
// Import plan
// ============================================================

/// Which top-level classes are referenced by simple name and which need an
/// import. A simple name taken by one class forces every other class with the
/// same simple name to be written fully qualified.
struct ImportPlan {
    /// top-level simple name → the top-level class owning it
    claimed: FxHashMap<SmolStr, ClassName>,
    imports: Vec<ImportDirective>,
    /// claimed names that resolve without an import
    implicit: IndexMap<SmolStr, String>,
}

impl ImportPlan {
    fn new(file: &FileSpec, classes: &IndexSet<ClassName>) -> Self {
        let mut plan = Self {
            claimed: FxHashMap::default(),
            imports: Vec::new(),
            implicit: IndexMap::new(),
        };
        for type_spec in &file.types {
            let own = ClassName::new(&file.package, &type_spec.name);
            plan.implicit
                .insert(type_spec.name.clone(), own.canonical_name());
            plan.claimed.insert(type_spec.name.clone(), own);
        }

        for class in classes {
            let top_level = class.top_level();
            let simple_name = SmolStr::new(top_level.simple_name());
            if plan.claimed.contains_key(&simple_name) {
                continue;
            }
            let needs_import = !top_level.package().is_empty()
                && top_level.package() != file.package.as_str()
                && !is_default_import_package(top_level.package());
            if needs_import {
                plan.imports
                    .push(ImportDirective::single(top_level.canonical_name()));
            } else {
                plan.implicit
                    .insert(simple_name.clone(), top_level.canonical_name());
            }
            plan.claimed.insert(simple_name, top_level);
        }
        plan
    }

    fn reference(&self, class: &ClassName) -> String {
        let top_level = class.top_level();
        match self.claimed.get(top_level.simple_name()) {
            Some(owner) if *owner == top_level => quote_path(&class.relative_name()),
            _ => quote_path(&class.canonical_name()),
        }
    }
}

// ============================================================
// Writing
// ============================================================

struct Writer<'a> {
    output: String,
    indent_level: usize,
    options: &'a GeneratorOptions,
    plan: &'a ImportPlan,
}

impl Writer<'_> {
    fn write_line(&mut self, text: &str) {
        let indent = self.options.indent(self.indent_level);
        let _ = writeln!(self.output, "{}{}", indent, text);
    }

    fn write_blank_line(&mut self) {
        self.output.push('\n');
    }

    fn write_type(&mut self, type_spec: &TypeSpec) {
        for annotation in &type_spec.annotations {
            let line = self.annotation(annotation);
            self.write_line(&line);
        }

        let mut header = modifiers(&type_spec.modifiers);
        header.push_str(type_spec.kind.keyword());
        header.push(' ');
        header.push_str(&quote(&type_spec.name));
        if let Some(constructor) = &type_spec.primary_constructor {
            header.push(' ');
            header.push_str(&modifiers(constructor));
            header.push_str("constructor()");
        }
        if !type_spec.supertypes.is_empty() {
            let supertypes: Vec<String> = type_spec
                .supertypes
                .iter()
                .map(|supertype| self.type_name(supertype))
                .collect();
            header.push_str(" : ");
            header.push_str(&supertypes.join(", "));
        }

        if type_spec.is_empty() {
            self.write_line(&header);
            return;
        }

        header.push_str(" {");
        self.write_line(&header);
        self.indent_level += 1;
        let mut first = true;
        for function in &type_spec.functions {
            if !first {
                self.write_blank_line();
            }
            first = false;
            self.write_function(function);
        }
        for nested in &type_spec.types {
            if !first {
                self.write_blank_line();
            }
            first = false;
            self.write_type(nested);
        }
        self.indent_level -= 1;
        self.write_line("}");
    }

    fn write_function(&mut self, function: &FunSpec) {
        for annotation in &function.annotations {
            let line = self.annotation(annotation);
            self.write_line(&line);
        }
        let parameters: Vec<String> = function
            .parameters
            .iter()
            .map(|parameter| {
                format!("{}: {}", quote(&parameter.name), self.type_name(&parameter.type_name))
            })
            .collect();
        let mut signature = format!(
            "{}fun {}({})",
            modifiers(&function.modifiers),
            quote(&function.name),
            parameters.join(", ")
        );
        if let Some(return_type) = &function.return_type {
            signature.push_str(": ");
            signature.push_str(&self.type_name(return_type));
        }
        self.write_line(&signature);
    }

    fn annotation(&self, annotation: &AnnotationSpec) -> String {
        let mut text = format!("@{}", self.plan.reference(&annotation.class));
        if !annotation.members.is_empty() {
            let members: Vec<String> = annotation.members.iter().map(|m| self.code(m)).collect();
            text.push('(');
            text.push_str(&members.join(", "));
            text.push(')');
        }
        text
    }

    fn code(&self, code: &CodeBlock) -> String {
        code.parts()
            .iter()
            .map(|part| match part {
                CodePart::Raw(text) => text.clone(),
                CodePart::Type(type_name) => self.type_name(type_name),
            })
            .collect()
    }

    fn type_name(&self, type_name: &TypeName) -> String {
        let mut text = String::new();
        for annotation in type_name.annotations() {
            text.push_str(&self.annotation(annotation));
            text.push(' ');
        }
        match type_name {
            TypeName::Class(class) => {
                text.push_str(&self.plan.reference(&class.class));
                if !class.arguments.is_empty() {
                    let arguments: Vec<String> =
                        class.arguments.iter().map(|a| self.type_argument(a)).collect();
                    text.push('<');
                    text.push_str(&arguments.join(", "));
                    text.push('>');
                }
                if class.nullable {
                    text.push('?');
                }
            }
            TypeName::Variable(variable) => {
                text.push_str(&variable.name);
                if variable.nullable {
                    text.push('?');
                }
            }
            TypeName::Lambda(lambda) => {
                let mut function = String::new();
                if lambda.is_suspend {
                    function.push_str("suspend ");
                }
                if let Some(receiver) = &lambda.receiver {
                    function.push_str(&self.type_name(receiver));
                    function.push('.');
                }
                let parameters: Vec<String> =
                    lambda.parameters.iter().map(|p| self.type_name(p)).collect();
                let _ = write!(
                    function,
                    "({}) -> {}",
                    parameters.join(", "),
                    self.type_name(&lambda.return_type)
                );
                if lambda.nullable {
                    let _ = write!(text, "({function})?");
                } else {
                    text.push_str(&function);
                }
            }
        }
        text
    }

    fn type_argument(&self, argument: &TypeArgument) -> String {
        match argument {
            TypeArgument::Star => "*".to_string(),
            TypeArgument::Type {
                variance: Some(variance),
                type_name,
            } => format!("{} {}", variance.keyword(), self.type_name(type_name)),
            TypeArgument::Type {
                variance: None,
                type_name,
            } => self.type_name(type_name),
        }
    }
}

fn modifiers(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|modifier| format!("{} ", modifier.keyword()))
        .collect()
}
