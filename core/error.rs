use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Config Read Error: Path '{path}', Error: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML Parsing Error: Path '{path}', Error: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Path Resolution Error: Path '{path}', Error: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory Creation Error: Path '{path}', Error: {source}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Remove Error: Path '{path}', Error: {source}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Create Error: Path '{path}', Error: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WalkDir Error: {0}")]
    WalkDir(String),

    #[error("Template Error: {0}")]
    Template(String),
}

impl AppError {
    /// Process exit code for the CLI: 1 for configuration, 2 for filesystem, 3 for templates.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::ConfigRead { .. } | AppError::ConfigParse { .. } => 1,
            AppError::PathResolution { .. }
            | AppError::DirCreation { .. }
            | AppError::FileRemove { .. }
            | AppError::FileCreate { .. }
            | AppError::FileRead { .. }
            | AppError::FileWrite { .. }
            | AppError::WalkDir(_) => 2,
            AppError::Template(_) => 3,
        }
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::WalkDir(err.to_string())
    }
}
