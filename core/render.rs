use crate::error::{AppError, Result};
use crate::template::Template;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Extension of a base name without its leading dot, as `filepath.Ext` style
/// tools see it: `.env` gives `env`, `Makefile` and `file.` give `""`.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx + 1..],
        None => "",
    }
}

/// Info-string for a fenced block. Only `rs` is renamed; everything else is kept verbatim.
pub fn language_tag(ext: &str) -> &str {
    match ext {
        "rs" => "rust",
        other => other,
    }
}

pub fn language_for_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    language_tag(file_extension(&name)).to_string()
}

/// Reads `path` and writes it wrapped in the source template.
pub fn render_file<W: Write>(
    out: &mut W,
    template: &Template,
    project: &str,
    path: &Path,
    relative_path: &Path,
) -> Result<()> {
    let bytes = fs::read(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut src = String::from_utf8_lossy(&bytes);
    if !src.is_empty() && !src.ends_with('\n') {
        src.to_mut().push('\n');
    }
    render_block(out, template, project, relative_path, &src)
}

pub fn render_block<W: Write>(
    out: &mut W,
    template: &Template,
    project: &str,
    relative_path: &Path,
    src: &str,
) -> Result<()> {
    let file_path: Cow<'_, str> = relative_path.to_string_lossy();
    let language = language_for_path(relative_path);
    template.render_to(
        out,
        &[
            ("project", project),
            ("filePath", &*file_path),
            ("language", language.as_str()),
            ("src", src),
        ],
    )
}
