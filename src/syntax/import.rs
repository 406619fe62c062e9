//! Import directives.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{quote, quote_path};

/// `import a.b.C`, `import a.b.*` or `import a.b.C as D`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportDirective {
    /// Dotted path without the trailing `.*`.
    pub path: SmolStr,
    pub is_star: bool,
    pub alias: Option<SmolStr>,
}

impl ImportDirective {
    pub fn single(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            is_star: false,
            alias: None,
        }
    }

    pub fn star(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            is_star: true,
            alias: None,
        }
    }

    pub fn aliased(path: impl Into<SmolStr>, alias: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            is_star: false,
            alias: Some(alias.into()),
        }
    }

    /// The name this directive makes visible, `None` for star imports.
    pub fn visible_name(&self) -> Option<&str> {
        if self.is_star {
            return None;
        }
        self.alias
            .as_deref()
            .or_else(|| self.path.rsplit('.').next())
    }

    /// Source form of the directive, e.g. `import a.b.C as D`. Segments that
    /// need it are backticked again.
    pub fn text(&self) -> String {
        let path = quote_path(&self.path);
        match (&self.alias, self.is_star) {
            (_, true) => format!("import {path}.*"),
            (Some(alias), false) => format!("import {path} as {}", quote(alias)),
            (None, false) => format!("import {path}"),
        }
    }
}

/// An import as it appears in a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub directive: ImportDirective,
    pub range: TextRange,
}
