//! Archive creation module.
//!
//! This module walks a directory tree and writes it into a ZIP archive,
//! honoring an ignore set and appending optional extra files at the top level.

pub mod walker;

pub mod config;
pub mod creator;
pub mod extra;
pub mod ignore;
pub mod progress;
pub mod zip;

// Re-exports for public API
pub use config::CreationConfig;
pub use creator::ArchiveCreator;
pub use extra::ExtraFile;
pub use extra::resolve_extra_files;
pub use ignore::IgnoreMatcher;
pub use ignore::IgnoreSet;
pub use walker::EntryType;
pub use walker::FilteredEntry;
pub use walker::FilteredWalker;
pub use walker::WalkItem;
