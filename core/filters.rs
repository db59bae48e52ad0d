use crate::config::Config;
use log;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".cargo", ".git", ".github"];
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    ".gitignore",
    ".gitmodules",
    ".dockerignore",
    "CODE_OF_CONDUCT.md",
    "CONTRIBUTING.md",
    "LICENSE",
    "Makefile",
];
pub const DEFAULT_EXCLUDED_EXTS: &[&str] = &["toml"];

/// Images and Markdown are listed in the tree but their content is never inlined.
pub const NOT_INLINED_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "ico", "svg", "webp", "md"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExclusionSet {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
    pub exts: Vec<String>,
}

impl ExclusionSet {
    pub fn defaults() -> Self {
        Self {
            dirs: to_owned_vec(DEFAULT_EXCLUDED_DIRS),
            files: to_owned_vec(DEFAULT_EXCLUDED_FILES),
            exts: to_owned_vec(DEFAULT_EXCLUDED_EXTS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut set = Self::defaults();
        set.dirs
            .extend(config.extra_exclude_pattern.iter().map(|p| normalize_pattern(p)));
        set.exts.extend(
            config
                .extra_exclude_file_ext
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string()),
        );
        log::debug!(
            "Exclusions: {} dirs, {} files, {} extensions",
            set.dirs.len(),
            set.files.len(),
            set.exts.len()
        );
        set
    }

    /// Matches a directory by its path relative to the walk root.
    pub fn is_excluded_dir(&self, relative_path: &Path) -> bool {
        self.dirs
            .iter()
            .any(|dir| !dir.is_empty() && Path::new(dir) == relative_path)
    }

    pub fn is_excluded_file_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }

    pub fn is_excluded_ext(&self, ext: &str) -> bool {
        !ext.is_empty() && self.exts.iter().any(|e| e == ext)
    }
}

pub fn is_not_inlined_ext(ext: &str) -> bool {
    NOT_INLINED_EXTS.contains(&ext)
}

/// Drops `.` components so `./vendor` matches the same directory as `vendor`.
fn normalize_pattern(pattern: &str) -> String {
    Path::new(pattern)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
