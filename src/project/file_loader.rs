use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use super::ProjectError;
use crate::base::FileId;
use crate::base::constants::KOTLIN_FILE_EXTENSION;
use crate::parser::parse_file;
use crate::syntax::KtFile;

fn is_kotlin_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(KOTLIN_FILE_EXTENSION)
}

/// Every `.kt` file named by `inputs`, directories searched recursively.
///
/// Files named directly are taken whatever their extension. The result is
/// sorted and free of duplicates so file ids are stable between runs.
pub fn collect_file_paths<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, ProjectError> {
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_file() {
            paths.push(input.to_path_buf());
        } else if input.is_dir() {
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry.map_err(|e| ProjectError::walk(input, e))?;
                if entry.file_type().is_file() && is_kotlin_file(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        } else {
            return Err(ProjectError::not_found(input));
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Reads and parses one file. Syntax problems end up in [`KtFile::errors`].
pub fn load_and_parse(path: &Path, file_id: FileId) -> Result<KtFile, ProjectError> {
    let content = fs::read_to_string(path).map_err(|e| ProjectError::read(path, e))?;
    let file = parse_file(file_id, path.display().to_string(), content);
    debug!(
        "parsed {} ({} classes, {} errors)",
        path.display(),
        file.classes.len(),
        file.errors.len()
    );
    Ok(file)
}

/// Collects, reads and parses every source of `inputs` in parallel.
/// File ids follow the sorted path order.
pub fn load_sources<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<KtFile>, ProjectError> {
    let paths = collect_file_paths(inputs)?;
    paths
        .par_iter()
        .enumerate()
        .map(|(index, path)| load_and_parse(path, FileId::new(index as u32)))
        .collect()
}
