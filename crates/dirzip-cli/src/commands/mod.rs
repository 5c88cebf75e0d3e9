//! Subcommand implementations.

pub mod completion;
pub mod rename_zip;
pub mod zip;

use dirzip_core::creation::CreationConfig;

/// Applies the optional `-l/--compression-level` flag to `config`.
fn with_level(config: CreationConfig, level: Option<u8>) -> CreationConfig {
    match level {
        Some(level) => config.with_compression_level(level),
        None => config,
    }
}
