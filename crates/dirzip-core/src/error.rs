//! Error types for directory archiving operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while archiving a directory.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("source is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The output archive could not be created or truncated.
    #[error("cannot open archive for writing: {path}: {source}")]
    OutputCreate {
        /// Output archive path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An extra file does not exist.
    #[error("extra file not found: {path}")]
    ExtraFileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An extra file exists but is not a regular file.
    #[error("extra file is not a regular file: {path}")]
    ExtraFileNotRegular {
        /// The offending path.
        path: PathBuf,
    },

    /// New directory name is empty or contains separator characters.
    #[error("invalid new name (must not be empty or contain '/', '\\' or ':'): {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Rename destination already exists.
    #[error("rename target already exists: {path}")]
    RenameTargetExists {
        /// The existing sibling path.
        path: PathBuf,
    },

    /// Renaming the source directory failed.
    #[error("failed to rename {from} to {to}: {source}")]
    RenameFailed {
        /// Original path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Restoring the original directory name failed.
    #[error("failed to restore {renamed} back to {original}: {source}")]
    RestoreFailed {
        /// Current (renamed) path.
        renamed: PathBuf,
        /// Name the directory should have been restored to.
        original: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A path cannot be represented as a ZIP entry name.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}, must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Required builder settings are missing.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is missing or wrong.
        reason: String,
    },

    /// The ZIP writer reported an error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    /// Returns `true` if this error is raised while validating inputs, before
    /// anything on disk has been created, renamed or truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirzip_core::ArchiveError;
    ///
    /// let err = ArchiveError::InvalidName {
    ///     name: "a/b".to_string(),
    /// };
    /// assert!(err.is_config_error());
    ///
    /// let err = ArchiveError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::ExtraFileNotFound { .. }
                | Self::ExtraFileNotRegular { .. }
                | Self::InvalidName { .. }
                | Self::RenameTargetExists { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::InvalidConfiguration { .. }
        )
    }

    /// Returns the filesystem path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::NotADirectory { path }
            | Self::OutputCreate { path, .. }
            | Self::ExtraFileNotFound { path }
            | Self::ExtraFileNotRegular { path }
            | Self::RenameTargetExists { path }
            | Self::NonUtf8Path { path } => Some(path),
            Self::RenameFailed { from, .. } => Some(from),
            Self::RestoreFailed { renamed, .. } => Some(renamed),
            Self::Io(_)
            | Self::InvalidName { .. }
            | Self::InvalidCompressionLevel { .. }
            | Self::InvalidConfiguration { .. }
            | Self::Zip(_) => None,
        }
    }
}
