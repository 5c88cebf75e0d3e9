//! Archiving operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a directory archiving operation.
///
/// Contains statistics and diagnostics about the run. `files_added` counts
/// file entries only; directory placeholders are tracked separately.
///
/// # Examples
///
/// ```
/// use dirzip_core::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.files_added = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Number of file entries written (walked files plus extra files).
    pub files_added: usize,

    /// Number of directory placeholder entries written.
    pub directories_added: usize,

    /// Total bytes read from source files (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Number of files that could not be added (unreadable, self-inclusion).
    pub files_skipped: usize,

    /// Root-relative paths excluded by the ignore set.
    pub ignored: Vec<PathBuf>,

    /// Duration of the operation.
    pub duration: Duration,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirzip_core::CreationReport;
    ///
    /// let mut report = CreationReport::new();
    /// report.add_warning("skipped output archive");
    /// assert!(report.has_warnings());
    /// ```
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the compression percentage (space saved).
    ///
    /// Returns 0.0 if nothing was written, and also when the archive is
    /// larger than its contents (headers dominate for tiny inputs).
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }

    /// Returns the total number of entries in the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }
}

/// Callback trait for progress reporting during archiving.
///
/// The archiver knows the number of files up front (pre-scan), so progress
/// is reported as an integer percentage rather than per entry.
///
/// # Examples
///
/// ```
/// use dirzip_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_start(&mut self, total: usize) {
///         println!("{total} files to archive");
///     }
///
///     fn on_progress(&mut self, percent: usize) {
///         println!("{percent}%");
///     }
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called once after the pre-scan, before any entry is written.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of files that will be written, extra files included
    fn on_start(&mut self, total: usize);

    /// Called every 50 files and on the final file.
    ///
    /// # Arguments
    ///
    /// * `percent` - `processed * 100 / total`, rounded down
    fn on_progress(&mut self, percent: usize);

    /// Called once after the archive has been finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&mut self, _total: usize) {}

    fn on_progress(&mut self, _percent: usize) {}

    fn on_complete(&mut self) {}
}
