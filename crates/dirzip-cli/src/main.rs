//! dirzip CLI - Command-line utility for archiving directories into ZIP
//! files.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use output::OutputFormatter;
use progress::CliProgress;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(&cli);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let show_progress = !cli.quiet && !cli.json && CliProgress::should_show();

    match &cli.command {
        cli::Commands::Zip(args) => commands::zip::execute(args, formatter, show_progress),
        cli::Commands::RenameZip(args) => {
            commands::rename_zip::execute(args, formatter, show_progress)
        }
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}
