//! Emission of generated files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::info;

use super::imports::EmittedText;
use crate::error::{GenerationError, Result};

/// Where generated units go.
pub trait CodeGenSink: Send + Sync {
    /// Stores one unit and returns the path it was written to.
    fn emit(&self, text: &EmittedText) -> Result<PathBuf>;
}

/// Writes units below a root directory, one directory per package segment.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CodeGenSink for DirectorySink {
    fn emit(&self, text: &EmittedText) -> Result<PathBuf> {
        let path = self.root.join(&text.relative_path);
        if let Some(directory) = path.parent() {
            create_package_directory(directory)?;
        }
        fs::write(&path, &text.content).map_err(|source| GenerationError::io(&path, source))?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}

/// Creates `directory` and its parents. A directory created concurrently by
/// another task is not an error.
fn create_package_directory(directory: &Path) -> Result<()> {
    match fs::create_dir_all(directory) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists && directory.is_dir() => Ok(()),
        Err(source) => Err(GenerationError::create_directory(directory, source)),
    }
}

/// Keeps units in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: Mutex<Vec<EmittedText>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> Vec<EmittedText> {
        self.units.lock().clone()
    }

    pub fn into_units(self) -> Vec<EmittedText> {
        self.units.into_inner()
    }
}

impl CodeGenSink for MemorySink {
    fn emit(&self, text: &EmittedText) -> Result<PathBuf> {
        self.units.lock().push(text.clone());
        Ok(text.relative_path.clone())
    }
}
