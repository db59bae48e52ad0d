pub mod config;
pub mod error;
pub mod filters;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod template;
pub mod tree;

pub use config::{Config, ConnectorStyle, DEFAULT_CONFIG_FILENAME};
pub use error::{AppError, Result};
pub use filters::ExclusionSet;
pub use pipeline::{Pipeline, RunSummary};
pub use render::{file_extension, language_tag};
pub use template::{Template, Templates};
pub use tree::{TreeEntry, render_tree};
