//! Rename-zip command implementation.

use crate::cli::RenameZipArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use dirzip_core::CreationReport;
use dirzip_core::NoopProgress;
use dirzip_core::RenameOutcome;
use dirzip_core::creation::CreationConfig;
use dirzip_core::rename_and_archive;
use std::env;
use std::path::PathBuf;

pub fn execute(
    args: &RenameZipArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    // `-d .` must name the directory itself, not `<cwd>/.`
    let joined = cwd.join(&args.dir);
    let dir = joined.canonicalize().unwrap_or(joined);

    let config = CreationConfig::default().with_windows_style(args.windows_style);
    let config = super::with_level(config, args.compression_level);

    let outcome = if show_progress {
        let mut progress = CliProgress::new("Zipping");
        add_archive_context(rename_and_archive(
            &dir,
            &args.new_name,
            &cwd,
            &config,
            &mut progress,
        ))?
    } else {
        add_archive_context(rename_and_archive(
            &dir,
            &args.new_name,
            &cwd,
            &config,
            &mut NoopProgress,
        ))?
    };

    let (output, report) = fold_restore_warning(outcome);
    formatter.format_creation_result("rename-zip", &output, &report)
}

/// Moves a restore failure into the report's warnings so every output mode
/// prints it alongside the summary.
///
/// The archive is complete at this point; a failed restore does not change
/// the exit code.
fn fold_restore_warning(outcome: RenameOutcome) -> (PathBuf, CreationReport) {
    let RenameOutcome {
        mut report,
        output,
        restore_warning,
    } = outcome;
    if let Some(warning) = restore_warning {
        report.add_warning(format!("{warning}; rename it back manually"));
    }
    (output, report)
}
