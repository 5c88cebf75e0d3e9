//! Configuration for archiving operations.

use crate::ArchiveError;
use crate::Result;
use crate::creation::extra::ExtraFile;
use crate::creation::ignore::IgnoreSet;

/// Configuration for archiving a directory.
///
/// # Examples
///
/// ```
/// use dirzip_core::creation::CreationConfig;
/// use dirzip_core::creation::IgnoreSet;
///
/// let config = CreationConfig::default()
///     .with_ignore(IgnoreSet::new(["target", ".git"]))
///     .with_windows_style(true)
///     .with_compression_level(9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CreationConfig {
    /// Root-relative paths excluded from the archive.
    ///
    /// Default: empty.
    pub ignore: IgnoreSet,

    /// Nest every walked entry under a folder named after the root.
    ///
    /// Default: `false`.
    pub windows_style: bool,

    /// Standalone files added at the top level after the walk.
    ///
    /// Default: empty.
    pub extra_files: Vec<ExtraFile>,

    /// Compression level (0-9). `Some(0)` stores entries uncompressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Force every entry to mode `0755` even when the host records real
    /// Unix modes.
    ///
    /// Hosts without Unix modes are always stamped.
    ///
    /// Default: `false`.
    pub stamp_unix_permissions: bool,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::default(),
            windows_style: false,
            extra_files: Vec::new(),
            compression_level: Some(6),
            stamp_unix_permissions: false,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ignore set.
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Sets whether to wrap entries in a folder named after the root.
    #[must_use]
    pub fn with_windows_style(mut self, windows_style: bool) -> Self {
        self.windows_style = windows_style;
        self
    }

    /// Sets the extra files.
    #[must_use]
    pub fn with_extra_files(mut self, extra_files: Vec<ExtraFile>) -> Self {
        self.extra_files = extra_files;
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the level is greater than 9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(level <= 9, "compression level must be 0-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to stamp `0755` on every entry.
    #[must_use]
    pub fn with_stamp_unix_permissions(mut self, stamp: bool) -> Self {
        self.stamp_unix_permissions = stamp;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is greater than 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
