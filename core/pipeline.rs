use crate::config::Config;
use crate::error::{AppError, Result};
use crate::filters::{ExclusionSet, is_not_inlined_ext};
use crate::paths;
use crate::render::{self, file_extension};
use crate::template::Templates;
use crate::tree;
use log;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub files_written: usize,
    pub files_skipped: usize,
}

/// Everything one run needs, built once from the loaded configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    exclusions: ExclusionSet,
    templates: Templates,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let templates = Templates::embedded()?;
        Self::with_templates(config, templates)
    }

    fn with_templates(config: Config, templates: Templates) -> Result<Self> {
        config.validate()?;
        let exclusions = ExclusionSet::from_config(&config);
        Ok(Self {
            config,
            exclusions,
            templates,
        })
    }

    /// Writes `<target>/<project>.md`, replacing any previous output.
    /// The first error aborts the run.
    pub fn run(&self) -> Result<RunSummary> {
        let source_root = paths::absolute_path(&self.config.source)?;
        let target_dir = paths::absolute_path(&self.config.target)?;
        if !source_root.is_dir() {
            return Err(AppError::PathResolution {
                path: source_root,
                source: io::Error::new(io::ErrorKind::NotFound, "source is not a directory"),
            });
        }
        log::info!(
            "Source: {}, target: {}",
            source_root.display(),
            target_dir.display()
        );

        paths::prepare_output_dir(&target_dir)?;

        let output_path = target_dir.join(self.config.output_file_name()?);
        paths::remove_file_if_exists(&output_path)?;

        let file = File::create(&output_path).map_err(|e| AppError::FileCreate {
            path: output_path.clone(),
            source: e,
        })?;
        let mut writer = OutputWriter::new(file, &output_path);

        log::info!("Rendering directory tree...");
        self.write_tree(&mut writer, &source_root)?;

        log::info!("Rendering source files...");
        let (files_written, files_skipped) =
            self.write_sources(&mut writer, &source_root, &output_path)?;
        writer.flush()?;

        log::debug!(
            "Wrote {} files, skipped {} files",
            files_written,
            files_skipped
        );
        Ok(RunSummary {
            output_path,
            files_written,
            files_skipped,
        })
    }

    fn write_tree(&self, writer: &mut OutputWriter, source_root: &Path) -> Result<()> {
        let listing = tree::render_tree(
            source_root,
            &self.exclusions,
            self.config.tree_connectors,
        )?;
        let mut block = Vec::new();
        self.templates.tree.render_to(
            &mut block,
            &[
                ("project", self.config.project.as_str()),
                ("content", listing.as_str()),
            ],
        )?;
        block.push(b'\n');
        writer.write(&block)
    }

    fn write_sources(
        &self,
        writer: &mut OutputWriter,
        source_root: &Path,
        output_path: &Path,
    ) -> Result<(usize, usize)> {
        let mut written = 0;
        let mut skipped = 0;
        let mut block = Vec::new();

        for entry in tree::walk_filtered(source_root, &self.exclusions) {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(reason) = self.skip_reason(path, output_path) {
                log::trace!("Skipping {} ({})", path.display(), reason);
                skipped += 1;
                continue;
            }

            let relative = paths::relative_to(path, source_root);
            log::trace!("Rendering {}", relative.display());
            block.clear();
            block.push(b'\n');
            render::render_file(
                &mut block,
                &self.templates.source,
                &self.config.project,
                path,
                &relative,
            )?;
            writer.write(&block)?;
            written += 1;
        }
        Ok((written, skipped))
    }

    fn skip_reason(&self, path: &Path, output_path: &Path) -> Option<&'static str> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let ext = file_extension(&name);
        if self.exclusions.is_excluded_file_name(&name) {
            Some("excluded file name")
        } else if is_not_inlined_ext(ext) {
            Some("content not inlined")
        } else if self.exclusions.is_excluded_ext(ext) {
            Some("excluded extension")
        } else if path == output_path {
            Some("output file")
        } else if path.is_dir() {
            Some("symlinked directory")
        } else {
            None
        }
    }
}

struct OutputWriter {
    inner: BufWriter<File>,
    path: PathBuf,
}

impl OutputWriter {
    fn new(file: File, path: &Path) -> Self {
        Self {
            inner: BufWriter::new(file),
            path: path.to_path_buf(),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(|e| self.write_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: io::Error) -> AppError {
        AppError::FileWrite {
            path: self.path.clone(),
            source,
        }
    }
}
