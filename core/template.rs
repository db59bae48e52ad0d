use crate::error::{AppError, Result};
use log;
use rust_embed::RustEmbed;
use std::io::Write;

pub const TREE_TEMPLATE: &str = "tree.tpl";
pub const SOURCE_TEMPLATE: &str = "src.tpl";

#[derive(RustEmbed)]
#[folder = "../data/templates/"]
struct TemplateAssets;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A parsed `{{ name }}` substitution template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after_open = &rest[start + 2..];
            let end = after_open.find("}}").ok_or_else(|| {
                AppError::Template(format!("{}: unclosed '{{{{' action", name))
            })?;
            let var = after_open[..end].trim();
            let var = var.strip_prefix('.').unwrap_or(var).trim();
            if var.is_empty() || !var.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(AppError::Template(format!(
                    "{}: invalid variable name '{}'",
                    name,
                    &after_open[..end]
                )));
            }
            segments.push(Segment::Var(var.to_string()));
            rest = &after_open[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        log::trace!("Parsed template '{}' into {} segments", name, segments.len());
        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    /// Loads and parses one of the templates compiled into the binary.
    pub fn embedded(file_name: &str) -> Result<Self> {
        let asset = TemplateAssets::get(file_name).ok_or_else(|| {
            AppError::Template(format!("Template not found in embed: {}", file_name))
        })?;
        let source = std::str::from_utf8(asset.data.as_ref()).map_err(|e| {
            AppError::Template(format!("UTF-8 error in embedded template {}: {}", file_name, e))
        })?;
        Self::parse(file_name, source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes the template to `out`, substituting each variable from `vars`.
    /// A variable missing from `vars` is an error; nothing after it is written.
    pub fn render_to<W: Write>(&self, out: &mut W, vars: &[(&str, &str)]) -> Result<()> {
        for segment in &self.segments {
            let text = match segment {
                Segment::Text(text) => text.as_str(),
                Segment::Var(var) => vars
                    .iter()
                    .find(|(key, _)| *key == var.as_str())
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        AppError::Template(format!(
                            "{}: no value for variable '{}'",
                            self.name, var
                        ))
                    })?,
            };
            out.write_all(text.as_bytes())
                .map_err(|e| AppError::Template(format!("{}: {}", self.name, e)))?;
        }
        Ok(())
    }

    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut buf = Vec::new();
        self.render_to(&mut buf, vars)?;
        String::from_utf8(buf).map_err(|e| AppError::Template(format!("{}: {}", self.name, e)))
    }
}

/// The tree wrapper and per-file wrapper used for one run.
#[derive(Debug, Clone)]
pub struct Templates {
    pub tree: Template,
    pub source: Template,
}

impl Templates {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            tree: Template::embedded(TREE_TEMPLATE)?,
            source: Template::embedded(SOURCE_TEMPLATE)?,
        })
    }
}
