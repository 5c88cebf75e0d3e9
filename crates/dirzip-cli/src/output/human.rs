//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use dirzip_core::CreationReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_heading(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style(text).yellow().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(
        &self,
        _operation: &str,
        output_path: &Path,
        report: &CreationReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let summary = format!(
            "Archived {} files to {}",
            Self::format_number(report.files_added),
            output_path.display()
        );
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {summary}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(&summary);
        }

        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                Self::format_size(report.bytes_compressed)
            ));
        }

        if report.files_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Files skipped:    {}", report.files_skipped));
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Directories:      {}",
                Self::format_number(report.directories_added)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));

            if !report.ignored.is_empty() {
                let _ = self.term.write_line("");
                self.write_heading("Ignored:");
                for path in &report.ignored {
                    let _ = self.term.write_line(&format!("  - {}", path.display()));
                }
            }
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            self.write_heading("Warnings:");
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
