//! Directory-to-ZIP archiving library.
//!
//! `dirzip-core` walks a directory tree and writes it into a ZIP archive. It
//! supports an ignore set matched by filesystem identity (so symlinks, hard
//! links and differently spelled paths all match), extra top-level files, an
//! optional wrapper folder named after the archived directory, and progress
//! callbacks.
//!
//! # Examples
//!
//! ```no_run
//! use dirzip_core::create_zip;
//! use dirzip_core::creation::CreationConfig;
//! use dirzip_core::creation::IgnoreSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CreationConfig::default()
//!     .with_ignore(IgnoreSet::new(["target", ".git"]))
//!     .with_windows_style(true);
//! let report = create_zip("project.zip", "project", &config)?;
//! println!("Archived {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod creation;
pub mod error;
pub mod rename;
pub mod report;

// Re-export main API types
pub use creation::zip::create_zip;
pub use creation::zip::create_zip_with_progress;
pub use error::ArchiveError;
pub use error::Result;
pub use rename::RenameOutcome;
pub use rename::RenamedDir;
pub use rename::rename_and_archive;
pub use report::CreationReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
