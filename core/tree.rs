use crate::config::ConnectorStyle;
use crate::error::Result;
use crate::filters::ExclusionSet;
use crate::paths;
use log;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const INDENT: &str = "│   ";
pub const CONNECTOR: &str = "├── ";
pub const LAST_CONNECTOR: &str = "└── ";

#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub depth: usize,
    pub is_dir: bool,
}

impl TreeEntry {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Depth-first walk of `root` in file-name order that never descends into
/// excluded directories.
pub fn walk_filtered<'a>(
    root: &'a Path,
    exclusions: &'a ExclusionSet,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let relative = paths::relative_to(entry.path(), root);
            let keep = !exclusions.is_excluded_dir(&relative);
            if !keep {
                log::trace!("Skipping excluded directory {}", relative.display());
            }
            keep
        })
}

/// Lists everything under `root` (the root included), skipping excluded
/// directories together with their subtrees.
pub fn collect_entries(root: &Path, exclusions: &ExclusionSet) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    for entry in walk_filtered(root, exclusions) {
        let entry = entry?;
        entries.push(TreeEntry {
            path: entry.path().to_path_buf(),
            depth: entry.depth(),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// Renders the ASCII listing for `root`. Relative roots are made absolute first.
pub fn render_tree(root: &Path, exclusions: &ExclusionSet, style: ConnectorStyle) -> Result<String> {
    let root = paths::absolute_path(root)?;
    log::debug!("Rendering directory tree for {}", root.display());
    let entries = collect_entries(&root, exclusions)?;
    let last_flags = match style {
        ConnectorStyle::Literal => Vec::new(),
        ConnectorStyle::LastSibling => last_sibling_flags(&entries),
    };

    let mut out = String::new();
    for (idx, entry) in entries.iter().enumerate() {
        let is_last = match style {
            ConnectorStyle::Literal => entry.is_dir && entry.depth > 0,
            ConnectorStyle::LastSibling => last_flags[idx],
        };
        out.push_str(&INDENT.repeat(entry.depth));
        out.push_str(if is_last { LAST_CONNECTOR } else { CONNECTOR });
        out.push_str(&entry.name());
        out.push('\n');
    }
    log::debug!("Tree rendered with {} entries", entries.len());
    Ok(out)
}

// Entries are in pre-order, so scanning backwards the first entry seen at a
// depth is the last child of its parent. Reaching a shallower entry closes
// every deeper level.
fn last_sibling_flags(entries: &[TreeEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    let mut seen: Vec<bool> = Vec::new();
    for (idx, entry) in entries.iter().enumerate().rev() {
        if seen.len() <= entry.depth {
            seen.resize(entry.depth + 1, false);
        }
        flags[idx] = !seen[entry.depth];
        seen[entry.depth] = true;
        seen.truncate(entry.depth + 1);
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("a.rs"), "fn a() {}").unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("b.txt"), "b").unwrap();
        fs::create_dir_all(root.join("vendor").join("dep")).unwrap();
        fs::write(root.join("vendor").join("dep").join("lib.rs"), "").unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("HEAD"), "ref").unwrap();
        temp
    }

    fn root_name(temp: &tempfile::TempDir) -> String {
        temp.path().file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn literal_style_marks_non_root_directories() {
        let temp = fixture();
        let tree = render_tree(temp.path(), &ExclusionSet::defaults(), ConnectorStyle::Literal)
            .unwrap();
        let expected = format!(
            "├── {root}\n\
             │   ├── a.rs\n\
             │   └── sub\n\
             │   │   ├── b.txt\n\
             │   └── vendor\n\
             │   │   └── dep\n\
             │   │   │   ├── lib.rs\n",
            root = root_name(&temp)
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn excluded_directories_drop_their_subtree() {
        let temp = fixture();
        let mut exclusions = ExclusionSet::defaults();
        exclusions.dirs.push("vendor".to_string());
        let tree = render_tree(temp.path(), &exclusions, ConnectorStyle::Literal).unwrap();
        assert!(!tree.contains("── vendor\n"));
        assert!(!tree.contains("── dep\n"));
        assert!(!tree.contains("── lib.rs\n"));
        assert!(!tree.contains("── .git\n"));
        assert!(!tree.contains("── HEAD\n"));
        assert!(tree.contains("── b.txt\n"));
    }

    #[test]
    fn nested_exclusion_uses_relative_path() {
        let temp = fixture();
        let mut exclusions = ExclusionSet::defaults();
        exclusions.dirs.push("vendor/dep".to_string());
        let tree = render_tree(temp.path(), &exclusions, ConnectorStyle::Literal).unwrap();
        assert!(tree.contains("── vendor\n"));
        assert!(!tree.contains("── dep\n"));
        assert!(!tree.contains("── lib.rs\n"));
    }

    #[test]
    fn last_sibling_style_marks_final_children() {
        let temp = fixture();
        let tree = render_tree(
            temp.path(),
            &ExclusionSet::defaults(),
            ConnectorStyle::LastSibling,
        )
        .unwrap();
        let expected = format!(
            "└── {root}\n\
             │   ├── a.rs\n\
             │   ├── sub\n\
             │   │   └── b.txt\n\
             │   └── vendor\n\
             │   │   └── dep\n\
             │   │   │   └── lib.rs\n",
            root = root_name(&temp)
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn last_sibling_flags_reset_between_subtrees() {
        let entry = |depth, is_dir| TreeEntry {
            path: PathBuf::from("x"),
            depth,
            is_dir,
        };
        // root, d1 { f }, d2 { f, f }
        let entries = vec![
            entry(0, true),
            entry(1, true),
            entry(2, false),
            entry(1, true),
            entry(2, false),
            entry(2, false),
        ];
        assert_eq!(
            last_sibling_flags(&entries),
            vec![true, false, true, true, false, true]
        );
    }
}
