//! Ignore-set handling for archive creation.
//!
//! Ignore entries are stored as written by the caller (relative to the scan
//! root) and only resolved when a walk starts, so the same set can be applied
//! to whatever directory ends up being scanned. Matching compares filesystem
//! identity rather than path strings: `a/../b`, a symlink to `b`, and a hard
//! link to `b` all match an ignore entry of `b`.
//!
//! Identity comes from an open [`Handle`] when the path can be opened, and
//! from a stat-based key when it cannot (a directory with mode `000`), so an
//! unreadable ignore entry still matches.

use same_file::Handle;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// Identity of a path that could not be opened.
#[cfg(unix)]
type StatKey = (u64, u64);

#[cfg(not(unix))]
type StatKey = PathBuf;

/// Device and inode from `stat`, which needs no read permission on the
/// target itself.
#[cfg(unix)]
fn stat_key(path: &Path) -> Option<StatKey> {
    use std::os::unix::fs::MetadataExt;
    let metadata = std::fs::metadata(path).ok()?;
    Some((metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn stat_key(path: &Path) -> Option<StatKey> {
    path.canonicalize().ok()
}

/// Set of root-relative paths excluded from the archive.
///
/// # Examples
///
/// ```
/// use dirzip_core::creation::IgnoreSet;
///
/// let ignore = IgnoreSet::new(["target", "notes/draft.txt"]);
/// assert_eq!(ignore.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: BTreeSet<PathBuf>,
}

impl IgnoreSet {
    /// Creates an ignore set from root-relative paths. Empty strings are
    /// dropped.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut set = Self::default();
        for path in paths {
            set.insert(path);
        }
        set
    }

    /// Adds a root-relative path.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            self.paths.insert(path);
        }
    }

    /// Number of entries in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over the unresolved entries.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Binds the set to a scan root.
    ///
    /// Entries that do not exist under `root` cannot match anything and are
    /// dropped here.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> IgnoreMatcher {
        let mut matcher = IgnoreMatcher::default();
        for rel in &self.paths {
            let path = root.join(rel);
            if let Some(key) = stat_key(&path) {
                matcher.stat_keys.insert(key);
            }
            if let Ok(handle) = Handle::from_path(&path) {
                matcher.handles.insert(handle);
            }
        }
        matcher
    }
}

/// An `IgnoreSet` bound to a concrete scan root.
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    handles: HashSet<Handle>,
    stat_keys: HashSet<StatKey>,
}

impl IgnoreMatcher {
    /// Returns `true` if no resolved entry remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty() && self.stat_keys.is_empty()
    }

    /// Returns `true` if `path` is the same file or directory as one of the
    /// ignore entries.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return false;
        }
        let handle = Handle::from_path(path).ok();
        self.matches_identity(handle.as_ref(), path)
    }

    /// Like [`matches`](Self::matches) for a path whose handle was already
    /// opened (or failed to open).
    ///
    /// Entries the handle does not match are compared by stat key, which
    /// covers both sides having been unreadable when opened.
    #[must_use]
    pub fn matches_identity(&self, handle: Option<&Handle>, path: &Path) -> bool {
        if handle.is_some_and(|handle| self.handles.contains(handle)) {
            return true;
        }
        stat_key(path).is_some_and(|key| self.stat_keys.contains(&key))
    }
}
