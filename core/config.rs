use crate::error::{AppError, Result};
use crate::template::Template;
use log;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "project.yaml";
pub const OUTPUT_EXTENSION: &str = "md";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub project: String,
    #[serde(default)]
    pub extra_exclude_pattern: Vec<String>,
    #[serde(default)]
    pub extra_exclude_file_ext: Vec<String>,
    #[serde(default = "default_dir")]
    pub source: PathBuf,
    #[serde(default = "default_dir")]
    pub target: PathBuf,
    #[serde(default)]
    pub file_name_template: Option<String>,
    #[serde(default)]
    pub tree_connectors: ConnectorStyle,
}

/// How the tree renderer picks between `├── ` and `└── `.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ConnectorStyle {
    /// `└── ` for every directory except the root, `├── ` for everything else.
    #[default]
    Literal,
    /// `└── ` for the last child of each directory.
    LastSibling,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    pub fn new(project: impl Into<String>, source: PathBuf, target: PathBuf) -> Self {
        Self {
            project: project.into(),
            extra_exclude_pattern: Vec::new(),
            extra_exclude_file_ext: Vec::new(),
            source,
            target,
            file_name_template: None,
            tree_connectors: ConnectorStyle::default(),
        }
    }

    pub fn resolve_config_path(cli_config_file: Option<&Path>) -> PathBuf {
        match cli_config_file {
            Some(path) => {
                log::debug!("Using specified config file path: {}", path.display());
                path.to_path_buf()
            }
            None => {
                log::debug!("Using default config file: {}", DEFAULT_CONFIG_FILENAME);
                PathBuf::from(DEFAULT_CONFIG_FILENAME)
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let yaml_content = fs::read_to_string(config_path).map_err(|e| AppError::ConfigRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&yaml_content).map_err(|e| match e {
            AppError::ConfigParse { source, .. } => AppError::ConfigParse {
                path: config_path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        let config: Config =
            serde_yml::from_str(yaml_content).map_err(|e| AppError::ConfigParse {
                path: PathBuf::new(),
                source: e,
            })?;
        config.validate()?;
        log::trace!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(AppError::Config(
                "'project' must be a non-empty name".to_string(),
            ));
        }
        if self.project.trim() != self.project {
            return Err(AppError::Config(format!(
                "'project' must not start or end with whitespace: {:?}",
                self.project
            )));
        }
        self.output_file_name()?;
        Ok(())
    }

    /// Name of the generated document inside the target directory.
    ///
    /// Defaults to `<project>.md`; `fileNameTemplate` may use `{{ .project }}`.
    pub fn output_file_name(&self) -> Result<String> {
        let name = match &self.file_name_template {
            Some(template) => Template::parse("fileNameTemplate", template)?
                .render(&[("project", self.project.as_str())])?,
            None => format!("{}.{}", self.project, OUTPUT_EXTENSION),
        };
        if name.trim().is_empty()
            || name.trim() != name
            || name.contains(['/', '\\'])
            || name == "."
            || name == ".."
        {
            return Err(AppError::Config(format!(
                "Output file name {:?} must be a plain file name",
                name
            )));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let yaml = r#"
project: demo
extraExcludePattern: ["vendor", "third_party/gen"]
extraExcludeFileExt: ["lock"]
source: ./src
target: out
fileNameTemplate: "{{ .project }}-snapshot.md"
treeConnectors: lastSibling
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.project, "demo");
        assert_eq!(config.extra_exclude_pattern, vec!["vendor", "third_party/gen"]);
        assert_eq!(config.extra_exclude_file_ext, vec!["lock"]);
        assert_eq!(config.source, PathBuf::from("./src"));
        assert_eq!(config.target, PathBuf::from("out"));
        assert_eq!(config.tree_connectors, ConnectorStyle::LastSibling);
        assert_eq!(config.output_file_name().unwrap(), "demo-snapshot.md");
    }

    #[test]
    fn defaults_apply_to_optional_fields() {
        let config = Config::from_yaml_str("project: demo\n").unwrap();
        assert!(config.extra_exclude_pattern.is_empty());
        assert!(config.extra_exclude_file_ext.is_empty());
        assert_eq!(config.source, PathBuf::from("."));
        assert_eq!(config.target, PathBuf::from("."));
        assert_eq!(config.tree_connectors, ConnectorStyle::Literal);
        assert_eq!(config.output_file_name().unwrap(), "demo.md");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_yaml() {
        assert!(matches!(
            Config::from_yaml_str("project: demo\nsoruce: typo\n"),
            Err(AppError::ConfigParse { .. })
        ));
        assert!(matches!(
            Config::from_yaml_str("project: [unclosed"),
            Err(AppError::ConfigParse { .. })
        ));
    }

    #[test]
    fn rejects_empty_project() {
        assert!(matches!(
            Config::from_yaml_str("project: \"  \"\n"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn rejects_project_with_surrounding_whitespace() {
        assert!(matches!(
            Config::from_yaml_str("project: \" demo\"\n"),
            Err(AppError::Config(_))
        ));
        let mut config = Config::new("demo", ".".into(), ".".into());
        config.file_name_template = Some(" {{ .project }}.md".to_string());
        assert!(matches!(config.output_file_name(), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_file_name_with_separator() {
        let mut config = Config::new("demo", ".".into(), ".".into());
        config.file_name_template = Some("nested/{{ .project }}.md".to_string());
        assert!(matches!(config.output_file_name(), Err(AppError::Config(_))));
        config.file_name_template = Some("{{ .unknown }}.md".to_string());
        assert!(matches!(config.output_file_name(), Err(AppError::Template(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load_from_path(Path::new("/definitely/not/here/project.yaml"))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn parse_error_carries_the_file_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, "project: [").unwrap();
        match Config::load_from_path(&path) {
            Err(AppError::ConfigParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
