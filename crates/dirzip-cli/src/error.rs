//! Error conversion utilities for CLI.
//!
//! Converts dirzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirzip_core::ArchiveError;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Directory to archive does not exist: {}\n\
                 HINT: -d/--dir is resolved against the current directory.",
                path.display()
            )
        }
        ArchiveError::NotADirectory { path } => {
            anyhow!(
                "Not a directory: {}\n\
                 HINT: Pass a single file with -e/--extra instead.",
                path.display()
            )
        }
        ArchiveError::OutputCreate { path, source } => {
            anyhow!(
                "Cannot open archive for writing: {}: {}\n\
                 HINT: Check that the directory exists and is writable.",
                path.display(),
                source
            )
        }
        ArchiveError::ExtraFileNotFound { path } => {
            anyhow!("Extra file does not exist: {}", path.display())
        }
        ArchiveError::ExtraFileNotRegular { path } => {
            anyhow!(
                "Extra file is not a regular file: {}\n\
                 HINT: Directories cannot be added with -e/--extra.",
                path.display()
            )
        }
        ArchiveError::InvalidName { name } => {
            anyhow!(
                "Invalid new name {name:?}\n\
                 HINT: The name must be non-empty and must not contain '/', '\\' or ':'."
            )
        }
        ArchiveError::RenameTargetExists { path } => {
            anyhow!(
                "Rename target already exists: {}\n\
                 HINT: Choose another name with -n/--new-name.",
                path.display()
            )
        }
        ArchiveError::RenameFailed { from, to, source } => {
            anyhow!(
                "Failed to rename '{}' to '{}': {}",
                from.display(),
                to.display(),
                source
            )
        }
        ArchiveError::RestoreFailed {
            renamed,
            original,
            source,
        } => {
            anyhow!(
                "Failed to restore '{}': {}\n\
                 HINT: Rename it back to '{}' manually.",
                renamed.display(),
                source,
                original.display()
            )
        }
        ArchiveError::NonUtf8Path { path } => {
            anyhow!(
                "Path cannot be stored in a ZIP archive: {}\n\
                 HINT: Rename the entry or leave it out with -i/--ignore.",
                path.display()
            )
        }
        _ => anyhow::Error::from(err).context("Failed to create archive"),
    }
}

/// Maps a core result into an anyhow result with guidance attached
pub fn add_archive_context<T>(result: Result<T, ArchiveError>) -> anyhow::Result<T> {
    result.map_err(convert_archive_error)
}
