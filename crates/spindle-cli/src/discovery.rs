//! Resolution of command-line paths into the list of files to process.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use spindle_syntax::SupportedLanguage;
use tracing::debug;

use crate::errors::AppError;

/// Expands `paths` into a sorted, de-duplicated file list.
///
/// Paths that are not directories are taken as given, so a missing or
/// unsupported file is reported by the pipeline rather than skipped.
/// Directories are walked recursively, honouring `.gitignore` and `.ignore`
/// files, and only files with a supported extension are kept.
pub(crate) fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "discovered files");
    Ok(files)
}

fn walk(root: &Path, files: &mut Vec<PathBuf>) -> Result<(), AppError> {
    let walker = WalkBuilder::new(root)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .build();

    for entry in walker {
        let entry = entry.map_err(|source| AppError::Discovery {
            path: root.to_path_buf(),
            source,
        })?;
        let is_file = entry.file_type().is_some_and(|kind| kind.is_file());
        if is_file && SupportedLanguage::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    Ok(())
}
