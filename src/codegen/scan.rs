//! Declaration scanning: finds every contribution function of every module class.

use super::markers::{InjectorTemplate, MarkerKind};
use super::reflect::{has_marker, reflect};
use crate::semantic::{LookupScope, SemanticModel};
use crate::syntax::{ClassDecl, FunctionDecl, KtFile};

/// A contribution function together with the module class declaring it.
#[derive(Debug, Clone)]
pub struct ContributionSite<'a> {
    pub file: &'a KtFile,
    /// The module class and its enclosing classes, outermost first.
    pub module: Vec<&'a ClassDecl>,
    /// Classes enclosing the function, outermost first. Equal to `module`
    /// unless the function lives in the module's companion object.
    pub scope: Vec<&'a ClassDecl>,
    pub function: &'a FunctionDecl,
    /// The trigger annotation found on the function.
    pub marker: MarkerKind,
    pub template: &'static InjectorTemplate,
}

impl<'a> ContributionSite<'a> {
    pub fn module_class(&self) -> &'a ClassDecl {
        self.module[self.module.len() - 1]
    }

    /// Lookup scope for names written on the function.
    pub fn lookup_scope(&self) -> LookupScope<'_> {
        LookupScope::new(self.file, &self.scope)
    }

    /// `Outer.Inner.function`
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.file.qualified_name(&self.module), self.function.name)
    }
}

/// Lazily yields every contribution site of `files`. Each call starts over.
pub fn scan<'a>(
    files: &'a [KtFile],
    model: &'a dyn SemanticModel,
) -> impl Iterator<Item = ContributionSite<'a>> + 'a {
    files.iter().flat_map(move |file| {
        file.classes_and_inner_classes()
            .into_iter()
            .filter(move |chain| {
                let class = chain[chain.len() - 1];
                let scope = LookupScope::new(file, chain);
                has_marker(&class.annotations, &scope, model, MarkerKind::Module)
            })
            .flat_map(move |chain| sites_in_module(file, chain, model))
    })
}

fn sites_in_module<'a>(
    file: &'a KtFile,
    module: Vec<&'a ClassDecl>,
    model: &'a dyn SemanticModel,
) -> Vec<ContributionSite<'a>> {
    let class = module[module.len() - 1];

    let mut scopes: Vec<(Vec<&'a ClassDecl>, &'a [FunctionDecl])> =
        vec![(module.clone(), class.functions.as_slice())];
    for companion in class.companion_objects() {
        let mut scope = module.clone();
        scope.push(companion);
        scopes.push((scope, companion.functions.as_slice()));
    }

    let mut sites = Vec::new();
    for (scope, functions) in scopes {
        for function in functions {
            let lookup = LookupScope::new(file, &scope);
            let trigger = reflect(&function.annotations, &lookup, model)
                .iter()
                .find_map(|instance| {
                    let marker = instance.marker()?;
                    marker.template().map(|template| (marker, template))
                });
            if let Some((marker, template)) = trigger {
                sites.push(ContributionSite {
                    file,
                    module: module.clone(),
                    scope: scope.clone(),
                    function,
                    marker,
                    template,
                });
            }
        }
    }
    sites
}
