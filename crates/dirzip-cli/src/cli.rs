//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Archive a directory into a ZIP file
    Zip(ZipArgs),
    /// Temporarily rename a directory, archive it, and restore the name
    RenameZip(RenameZipArgs),
    /// Generate shell completion script
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ZipArgs {
    /// Output archive name, created in the current directory
    #[arg(short = 'f', long = "filename", default_value = "output.zip")]
    pub filename: PathBuf,

    /// Directory to archive, relative to the current directory
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: PathBuf,

    /// Paths to leave out, relative to DIR (comma-separated, can be repeated)
    #[arg(short = 'i', long = "ignore", value_name = "PATH", value_delimiter = ',')]
    pub ignore: Vec<PathBuf>,

    /// Extra files stored at the archive root (comma-separated, can be repeated)
    #[arg(short = 'e', long = "extra", value_name = "FILE", value_delimiter = ',')]
    pub extra: Vec<PathBuf>,

    /// Nest entries under a folder named after DIR
    #[arg(short = 'w', long)]
    pub windows_style: bool,

    /// Compression level (0 stores entries uncompressed)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,
}

#[derive(clap::Args)]
pub struct RenameZipArgs {
    /// Directory to rename and archive, relative to the current directory
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: PathBuf,

    /// Temporary name; the archive is written as NAME.zip
    #[arg(short = 'n', long = "new-name", value_name = "NAME")]
    pub new_name: String,

    /// Nest entries under a folder named NAME
    #[arg(short = 'w', long)]
    pub windows_style: bool,

    /// Compression level (0 stores entries uncompressed)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,
}
