//! Fatal generation errors.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use text_size::TextRange;
use thiserror::Error;

use crate::syntax::KtFile;

/// A position in an input file a diagnostic can point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceElement {
    pub path: Arc<str>,
    pub range: TextRange,
    /// 1-based
    pub line: u32,
    /// 1-based
    pub col: u32,
}

impl SourceElement {
    pub fn new(file: &KtFile, range: TextRange) -> Self {
        let position = file.line_col(range);
        Self {
            path: Arc::clone(&file.path),
            range,
            line: position.line + 1,
            col: position.col + 1,
        }
    }
}

impl fmt::Display for SourceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.col)
    }
}

/// Every error that aborts generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The input cannot be turned into a valid unit.
    #[error("{}", located(.element, .message))]
    Structural {
        message: String,
        element: Option<SourceElement>,
    },

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not generate package directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    pub fn structural(message: impl Into<String>, element: Option<SourceElement>) -> Self {
        Self::Structural {
            message: message.into(),
            element,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn create_directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            source,
        }
    }

    /// The declaration the error points at, if any.
    pub fn element(&self) -> Option<&SourceElement> {
        match self {
            Self::Structural { element, .. } => element.as_ref(),
            _ => None,
        }
    }
}

fn located(element: &Option<SourceElement>, message: &str) -> String {
    match element {
        Some(element) => format!("{element}: {message}"),
        None => message.to_string(),
    }
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;
