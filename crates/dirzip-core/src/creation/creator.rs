//! Builder for archiving a directory with a fluent API.

use std::path::Path;
use std::path::PathBuf;

use crate::NoopProgress;
use crate::ProgressCallback;
use crate::creation::config::CreationConfig;
use crate::creation::extra::ExtraFile;
use crate::error::ArchiveError;
use crate::error::Result;
use crate::report::CreationReport;

/// Builder for archiving a directory.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::creation::ArchiveCreator;
///
/// let report = ArchiveCreator::new()
///     .output("site.zip")
///     .source("site/")
///     .ignore("node_modules")
///     .windows_style(true)
///     .create()?;
///
/// println!("Archived {} files", report.files_added);
/// # Ok::<(), dirzip_core::ArchiveError>(())
/// ```
#[derive(Debug, Default)]
pub struct ArchiveCreator {
    output_path: Option<PathBuf>,
    source: Option<PathBuf>,
    config: CreationConfig,
}

impl ArchiveCreator {
    /// Creates a new `ArchiveCreator` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output archive path.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory to archive.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the full configuration.
    #[must_use]
    pub fn config(mut self, config: CreationConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a path, relative to the source directory, to the ignore set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirzip_core::creation::ArchiveCreator;
    ///
    /// let creator = ArchiveCreator::new().ignore("target").ignore(".git");
    /// ```
    #[must_use]
    pub fn ignore<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.ignore.insert(path);
        self
    }

    /// Appends an extra top-level file.
    #[must_use]
    pub fn extra_file(mut self, extra: ExtraFile) -> Self {
        self.config.extra_files.push(extra);
        self
    }

    /// Sets whether entries are nested under a folder named after the source.
    #[must_use]
    pub fn windows_style(mut self, windows_style: bool) -> Self {
        self.config.windows_style = windows_style;
        self
    }

    /// Sets the compression level (0-9, 0 stores entries uncompressed).
    ///
    /// Out-of-range values are rejected by `create()`.
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = Some(level);
        self
    }

    /// Creates the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output path or source not set
    /// - Invalid configuration (e.g., invalid compression level)
    /// - Any error from [`crate::creation::zip::create_zip`]
    pub fn create(self) -> Result<CreationReport> {
        self.create_with_progress(&mut NoopProgress)
    }

    /// Creates the archive, reporting progress to `progress`.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveCreator::create`].
    pub fn create_with_progress(
        self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        let output_path = self
            .output_path
            .ok_or_else(|| ArchiveError::InvalidConfiguration {
                reason: "output path not set".to_string(),
            })?;
        let source = self
            .source
            .ok_or_else(|| ArchiveError::InvalidConfiguration {
                reason: "source directory not set".to_string(),
            })?;

        self.config.validate()?;

        crate::creation::zip::create_zip_with_progress(
            &output_path,
            &source,
            &self.config,
            progress,
        )
    }
}
