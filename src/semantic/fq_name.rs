//! Fully qualified names and class identifiers.

use std::fmt;

use smol_str::SmolStr;

use crate::base::is_identifier;

/// A dotted fully qualified name, e.g. `dagger.android.AndroidInjector.Factory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FqName(SmolStr);

impl FqName {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn root() -> Self {
        Self(SmolStr::default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// The last segment.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }

    pub fn parent(&self) -> Option<FqName> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('.') {
            Some(dot) => FqName::new(&self.0[..dot]),
            None => FqName::root(),
        })
    }

    pub fn child(&self, name: &str) -> FqName {
        if self.is_root() {
            FqName::new(name)
        } else {
            FqName::new(format!("{}.{}", self.0, name))
        }
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(name: &str) -> Self {
        FqName::new(name)
    }
}

/// A classifier split into its package and its dotted name relative to the
/// package, so `a.b.Outer.Inner` is `(a.b, Outer.Inner)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId {
    pub package: FqName,
    pub relative_name: FqName,
}

impl ClassId {
    pub fn new(package: impl Into<FqName>, relative_name: impl Into<FqName>) -> Self {
        Self {
            package: package.into(),
            relative_name: relative_name.into(),
        }
    }

    /// Guesses the package boundary of a dotted name by the usual casing
    /// convention: lower-case package segments followed by capitalized class
    /// segments. A name without a capitalized segment is taken as a top-level
    /// class named after its last segment.
    ///
    /// Returns `None` if any segment is not a valid identifier.
    pub fn best_guess(name: &str) -> Option<ClassId> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            return None;
        }
        let split = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len() - 1);
        Some(ClassId::new(
            FqName::new(segments[..split].join(".")),
            FqName::new(segments[split..].join(".")),
        ))
    }

    pub fn fq_name(&self) -> FqName {
        let mut fq_name = self.package.clone();
        for segment in self.relative_name.segments() {
            fq_name = fq_name.child(segment);
        }
        fq_name
    }

    pub fn short_name(&self) -> &str {
        self.relative_name.short_name()
    }

    /// Simple names from the outermost class to this one.
    pub fn simple_names(&self) -> Vec<&str> {
        self.relative_name.segments().collect()
    }

    pub fn is_nested(&self) -> bool {
        self.relative_name.as_str().contains('.')
    }

    /// The top-level class containing this one (itself if top-level).
    pub fn outermost(&self) -> ClassId {
        let first = self.relative_name.segments().next().unwrap_or_default();
        ClassId::new(self.package.clone(), FqName::new(first))
    }

    pub fn nested(&self, name: &str) -> ClassId {
        ClassId::new(self.package.clone(), self.relative_name.child(name))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fq_name())
    }
}
