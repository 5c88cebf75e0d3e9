//! Zip command implementation.

use crate::cli::ZipArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use dirzip_core::creation::ArchiveCreator;
use dirzip_core::creation::CreationConfig;
use dirzip_core::creation::IgnoreSet;
use dirzip_core::creation::resolve_extra_files;
use std::env;

pub fn execute(
    args: &ZipArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let root = cwd.join(&args.dir);
    let output = cwd.join(&args.filename);

    let extra_files = add_archive_context(resolve_extra_files(&args.extra, &cwd))?;
    let config = CreationConfig::default()
        .with_ignore(IgnoreSet::new(args.ignore.iter().cloned()))
        .with_windows_style(args.windows_style)
        .with_extra_files(extra_files);
    let config = super::with_level(config, args.compression_level);

    let creator = ArchiveCreator::new()
        .output(&output)
        .source(&root)
        .config(config);

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress {
        let mut progress = CliProgress::new("Zipping");
        add_archive_context(creator.create_with_progress(&mut progress))?
    } else {
        add_archive_context(creator.create())?
    };

    formatter.format_creation_result("zip", &output, &report)
}
