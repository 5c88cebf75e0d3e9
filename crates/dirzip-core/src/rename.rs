//! Temporary directory renaming around an archive run.
//!
//! `rename-zip` archives a directory under a different top-level name. The
//! directory is renamed in place, archived, and renamed back. [`RenamedDir`]
//! is the guard that owns the "renamed" state: dropping it without calling
//! [`RenamedDir::restore`] still attempts to put the original name back.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::CreationConfig;
use crate::creation::zip::create_zip_with_progress;
use crate::report::CreationReport;

const FORBIDDEN_NAME_CHARS: [char; 3] = ['/', '\\', ':'];

/// Checks that `name` can be used as a sibling directory name.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidName` if the name is empty or contains
/// `/`, `\` or `:`.
///
/// # Examples
///
/// ```
/// use dirzip_core::rename::validate_new_name;
///
/// assert!(validate_new_name("release-1.2").is_ok());
/// assert!(validate_new_name("a/b").is_err());
/// assert!(validate_new_name("").is_err());
/// ```
pub fn validate_new_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(FORBIDDEN_NAME_CHARS) {
        return Err(ArchiveError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A directory that has been renamed and must be restored.
#[derive(Debug)]
pub struct RenamedDir {
    original: PathBuf,
    renamed: PathBuf,
    restored: bool,
}

impl RenamedDir {
    /// Renames `dir` to a sibling called `new_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `new_name` is not a valid directory name
    /// - `dir` does not exist or is not a directory
    /// - The sibling `new_name` already exists
    /// - The rename itself fails
    pub fn rename<P: AsRef<Path>>(dir: P, new_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        validate_new_name(new_name)?;

        if !dir.exists() {
            return Err(ArchiveError::SourceNotFound {
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(ArchiveError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let renamed = dir
            .parent()
            .map_or_else(|| PathBuf::from(new_name), |parent| parent.join(new_name));
        if renamed.symlink_metadata().is_ok() {
            return Err(ArchiveError::RenameTargetExists { path: renamed });
        }

        fs::rename(dir, &renamed).map_err(|source| ArchiveError::RenameFailed {
            from: dir.to_path_buf(),
            to: renamed.clone(),
            source,
        })?;

        Ok(Self {
            original: dir.to_path_buf(),
            renamed,
            restored: false,
        })
    }

    /// Current location of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.renamed
    }

    /// Location the directory is restored to.
    #[must_use]
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Renames the directory back to its original name.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::RestoreFailed` if the rename back fails. The
    /// directory is left under its new name in that case.
    pub fn restore(mut self) -> Result<()> {
        self.restore_in_place()
    }

    fn restore_in_place(&mut self) -> Result<()> {
        self.restored = true;
        fs::rename(&self.renamed, &self.original).map_err(|source| ArchiveError::RestoreFailed {
            renamed: self.renamed.clone(),
            original: self.original.clone(),
            source,
        })
    }
}

impl Drop for RenamedDir {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.restore_in_place();
        }
    }
}

/// Result of [`rename_and_archive`].
#[derive(Debug)]
pub struct RenameOutcome {
    /// Report from the archive run.
    pub report: CreationReport,
    /// Path of the written archive.
    pub output: PathBuf,
    /// Set when the archive was written but the directory could not be
    /// renamed back.
    pub restore_warning: Option<String>,
}

/// Renames `dir` to `new_name`, archives it as `<output_dir>/<new_name>.zip`
/// and renames it back.
///
/// The restore is attempted whether or not archiving succeeded. A failed
/// restore after a successful archive is reported through
/// [`RenameOutcome::restore_warning`] rather than as an error.
///
/// # Errors
///
/// Returns an error if the rename fails, or the archiving error if writing
/// the archive fails (after the restore attempt).
pub fn rename_and_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    new_name: &str,
    output_dir: Q,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<RenameOutcome> {
    let output = output_dir.as_ref().join(format!("{new_name}.zip"));
    let guard = RenamedDir::rename(dir, new_name)?;

    let archived = create_zip_with_progress(&output, guard.path(), config, progress);
    let restored = guard.restore();

    let report = archived?;
    let restore_warning = restored.err().map(|e| e.to_string());

    Ok(RenameOutcome {
        report,
        output,
        restore_warning,
    })
}
