//! Progress bar implementation for CLI operations.

use console::Term;
use dirzip_core::ProgressCallback;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

/// Length of the bar; positions are percentages.
const BAR_LENGTH: u64 = 100;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// The archiver reports whole percentages, so the bar always spans 0-100
/// regardless of how many files are written. Automatically cleans up on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to display (e.g., "Zipping")
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(BAR_LENGTH);

        // Template: "Zipping [████████░░░░] 42% (120 files, 3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}% ({prefix} files, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_start(&mut self, total: usize) {
        self.bar.set_prefix(total.to_string());
        self.bar.set_position(0);
    }

    fn on_progress(&mut self, percent: usize) {
        let position = u64::try_from(percent).unwrap_or(BAR_LENGTH).min(BAR_LENGTH);
        self.bar.set_position(position);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
