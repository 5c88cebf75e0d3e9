//! Progress tracking for archive creation.
//!
//! `ProgressTracker` owns the processed/total pair and decides when the
//! `ProgressCallback` should hear about it: every [`PROGRESS_INTERVAL`] files
//! and once more on the final file.

use crate::ProgressCallback;

/// Number of processed files between two progress reports.
pub const PROGRESS_INTERVAL: usize = 50;

/// Returns the percentage to report after `processed` files, if one is due.
///
/// Nothing is reported when `total` is zero. The value is not clamped: if
/// the tree grew between the counting pass and the write pass it can exceed
/// 100.
///
/// # Examples
///
/// ```
/// use dirzip_core::creation::progress::progress_percent;
///
/// assert_eq!(progress_percent(50, 200), Some(25));
/// assert_eq!(progress_percent(51, 200), None);
/// assert_eq!(progress_percent(3, 3), Some(100));
/// assert_eq!(progress_percent(1, 0), None);
/// ```
#[must_use]
pub fn progress_percent(processed: usize, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    if processed % PROGRESS_INTERVAL == 0 || processed == total {
        Some(processed * 100 / total)
    } else {
        None
    }
}

/// Manages progress callbacks with automatic file counting.
///
/// # Examples
///
/// ```
/// use dirzip_core::NoopProgress;
/// use dirzip_core::creation::progress::ProgressTracker;
///
/// let mut progress = NoopProgress;
/// let mut tracker = ProgressTracker::new(&mut progress, 2);
/// tracker.on_file_complete();
/// tracker.on_file_complete();
/// assert_eq!(tracker.processed(), 2);
/// ```
pub struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    processed: usize,
    total: usize,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a tracker and announces `total` to the callback.
    #[must_use]
    pub fn new(progress: &'a mut dyn ProgressCallback, total: usize) -> Self {
        progress.on_start(total);
        Self {
            progress,
            processed: 0,
            total,
        }
    }

    /// Records one written file and reports progress if due.
    pub fn on_file_complete(&mut self) {
        self.processed += 1;
        if let Some(percent) = progress_percent(self.processed, self.total) {
            self.progress.on_progress(percent);
        }
    }

    /// Number of files recorded so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Total announced at construction.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Reports that the archive has been finished.
    pub fn on_complete(&mut self) {
        self.progress.on_complete();
    }
}
