use crate::error::{AppError, Result};
use log;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Expands a leading `~` and returns an absolute, lexically cleaned path.
///
/// The path does not need to exist. `.` components are dropped and `..`
/// pops the previous component, so `/a/b/../c` resolves to `/a/c`.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| AppError::PathResolution {
            path: path.to_path_buf(),
            source: e,
        })?;
        cwd.join(expanded)
    };
    Ok(clean_path(&joined))
}

fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Creates `path` and any missing parents.
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        log::debug!("Creating output directory: {}", path.display());
    }
    fs::create_dir_all(path).map_err(|e| AppError::DirCreation {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Removes a file if present. A missing file is not an error.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed previous output: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::FileRemove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// `path` relative to `root`; an empty path when they are equal.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
}
