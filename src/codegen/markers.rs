//! The annotations the generator recognizes, and what each one produces.

use super::types::ClassName;

pub const DAGGER_LAZY: &str = "dagger.Lazy";
pub const JAVAX_PROVIDER: &str = "javax.inject.Provider";

/// A recognized marker annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `@dagger.Module` on the class hosting contribution functions.
    Module,
    /// `@dagger.android.ContributesAndroidInjector` on a function.
    ContributesAndroidInjector,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Module, MarkerKind::ContributesAndroidInjector];

    pub fn fq_name(self) -> &'static str {
        match self {
            MarkerKind::Module => "dagger.Module",
            MarkerKind::ContributesAndroidInjector => "dagger.android.ContributesAndroidInjector",
        }
    }

    pub fn from_fq_name(fq_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.fq_name() == fq_name)
    }

    /// True for the marker that qualifies a class to host contributions.
    pub fn is_host(self) -> bool {
        matches!(self, MarkerKind::Module)
    }

    /// The unit produced for each function carrying this marker.
    pub fn template(self) -> Option<&'static InjectorTemplate> {
        match self {
            MarkerKind::Module => None,
            MarkerKind::ContributesAndroidInjector => Some(&ANDROID_INJECTOR),
        }
    }
}

/// Names of everything a generated injector unit is built from.
#[derive(Debug)]
pub struct InjectorTemplate {
    /// Infix between the enclosing name and the binding name.
    pub name_infix: &'static str,
    pub component_suffix: &'static str,
    pub factory_name: &'static str,
    pub bind_function: &'static str,
    pub bind_parameter: &'static str,
    pub module: (&'static str, &'static str),
    pub component: (&'static str, &'static str),
    pub component_factory: (&'static str, &'static str),
    pub injector: (&'static str, &'static str),
    pub injector_factory: (&'static str, &'static str),
    pub binds: (&'static str, &'static str),
    pub into_map: (&'static str, &'static str),
    pub map_key: (&'static str, &'static str),
}

static ANDROID_INJECTOR: InjectorTemplate = InjectorTemplate {
    name_infix: "_Bind",
    component_suffix: "Subcomponent",
    factory_name: "Factory",
    bind_function: "bindAndroidInjectorFactory",
    bind_parameter: "builder",
    module: ("dagger", "Module"),
    component: ("dagger", "Subcomponent"),
    component_factory: ("dagger", "Subcomponent.Factory"),
    injector: ("dagger.android", "AndroidInjector"),
    injector_factory: ("dagger.android", "AndroidInjector.Factory"),
    binds: ("dagger", "Binds"),
    into_map: ("dagger.multibindings", "IntoMap"),
    map_key: ("dagger.multibindings", "ClassKey"),
};

/// `(package, relative name)` to a [`ClassName`].
pub fn class_name((package, relative): (&str, &str)) -> ClassName {
    let mut names = relative.split('.');
    let first = names.next().unwrap_or_default();
    names.fold(ClassName::new(package, first), |class, name| class.nested(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_table() {
        for kind in MarkerKind::ALL {
            assert_eq!(MarkerKind::from_fq_name(kind.fq_name()), Some(kind));
        }
        assert_eq!(MarkerKind::from_fq_name("dagger.Provides"), None);
        assert!(MarkerKind::Module.is_host());
        assert!(MarkerKind::Module.template().is_none());
        assert!(MarkerKind::ContributesAndroidInjector.template().is_some());
    }

    #[test]
    fn test_template_class_names() {
        let template = MarkerKind::ContributesAndroidInjector
            .template()
            .expect("template");
        let factory = class_name(template.injector_factory);
        assert_eq!(factory.canonical_name(), "dagger.android.AndroidInjector.Factory");
        assert_eq!(factory.top_level(), class_name(template.injector));
    }
}
