//! Standalone files added to an archive next to the walked directory.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// A file added at the archive's top level, independent of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraFile {
    /// Absolute path of the file on disk.
    pub source: PathBuf,

    /// Name of the entry inside the archive (forward slashes).
    pub entry_name: String,
}

impl ExtraFile {
    /// Creates an extra file with an explicit entry name.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, entry_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entry_name: entry_name.into(),
        }
    }

    /// Resolves a user-supplied path against the working directory.
    ///
    /// The entry name is the path relative to `cwd` when the file lives
    /// under it, otherwise the bare filename.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirzip_core::creation::ExtraFile;
    /// use std::path::Path;
    ///
    /// let cwd = std::env::current_dir()?;
    /// let extra = ExtraFile::resolve(Path::new("docs/README.md"), &cwd)?;
    /// assert_eq!(extra.entry_name, "docs/README.md");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a regular file.
    pub fn resolve(input: &Path, cwd: &Path) -> Result<Self> {
        let joined = cwd.join(input);
        if !joined.exists() {
            return Err(ArchiveError::ExtraFileNotFound { path: joined });
        }
        let source = joined.canonicalize()?;
        if !source.is_file() {
            return Err(ArchiveError::ExtraFileNotRegular { path: source });
        }

        let base = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
        let entry_name =
            relative_entry_name(&source, &base).unwrap_or_else(|| file_name_entry(&source));

        Ok(Self { source, entry_name })
    }
}

/// Resolves every non-empty input in order.
///
/// # Errors
///
/// Fails on the first input that is missing or not a regular file.
pub fn resolve_extra_files<P: AsRef<Path>>(
    inputs: &[P],
    cwd: &Path,
) -> Result<Vec<ExtraFile>> {
    inputs
        .iter()
        .map(AsRef::as_ref)
        .filter(|input| !input.as_os_str().is_empty())
        .map(|input| ExtraFile::resolve(input, cwd))
        .collect()
}

/// Path of `source` relative to `base`, joined with `/`, if it stays inside
/// `base`.
fn relative_entry_name(source: &Path, base: &Path) -> Option<String> {
    let rel = source.strip_prefix(base).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn file_name_entry(source: &Path) -> String {
    source
        .file_name()
        .map_or_else(|| source.to_string_lossy(), |name| name.to_string_lossy())
        .into_owned()
}
