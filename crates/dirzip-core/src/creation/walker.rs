//! Directory tree walking with ignore-set pruning.
//!
//! The walker follows directory symlinks, silently skips entries the process
//! may not read, prunes ignored directories, and flags the output archive
//! when it lives inside the tree. Both the counting pass and the write pass
//! use it so they agree on what gets archived.

use crate::creation::ignore::IgnoreMatcher;
use same_file::Handle;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks a directory tree, applying an ignore matcher.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::creation::IgnoreSet;
/// use dirzip_core::creation::walker::FilteredWalker;
/// use dirzip_core::creation::walker::WalkItem;
/// use std::path::Path;
///
/// let root = Path::new("./project");
/// let ignore = IgnoreSet::new(["target"]).resolve(root);
/// let walker = FilteredWalker::new(root, &ignore);
///
/// for item in walker.walk() {
///     if let WalkItem::Entry(entry) = item {
///         println!("Would add: {}", entry.relative_path.display());
///     }
/// }
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    ignore: &'a IgnoreMatcher,
    output: Option<&'a Handle>,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker over `root`. The root itself is never yielded.
    #[must_use]
    pub fn new(root: &'a Path, ignore: &'a IgnoreMatcher) -> Self {
        Self {
            root,
            ignore,
            output: None,
        }
    }

    /// Flags regular files identical to `output` as [`WalkItem::OutputArchive`].
    #[must_use]
    pub fn with_output(mut self, output: Option<&'a Handle>) -> Self {
        self.output = output;
        self
    }

    /// Returns an iterator over the walk.
    pub fn walk(&self) -> Walk<'a> {
        Walk {
            root: self.root,
            ignore: self.ignore,
            output: self.output,
            inner: WalkDir::new(self.root)
                .follow_links(true)
                .min_depth(1)
                .into_iter(),
        }
    }

    /// Counts the regular files the write pass will add.
    #[must_use]
    pub fn count_files(&self) -> usize {
        self.walk()
            .filter(|item| {
                matches!(item, WalkItem::Entry(entry) if entry.entry_type == EntryType::File)
            })
            .count()
    }
}

/// One step of a filtered walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    /// A file or directory to archive.
    Entry(FilteredEntry),

    /// An entry excluded by the ignore set. Ignored directories are not
    /// descended into.
    Ignored {
        /// Path relative to the walk root.
        relative_path: PathBuf,
        /// Whether the entry is a directory.
        is_dir: bool,
    },

    /// The archive being written, found inside the tree.
    OutputArchive {
        /// Path relative to the walk root.
        relative_path: PathBuf,
    },

    /// An entry the walk could not process (symlink loop, dangling link).
    Unreadable {
        /// Description of the failure.
        message: String,
    },
}

/// A directory entry that passed filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Path relative to the walk root.
    pub relative_path: PathBuf,

    /// Type of entry.
    pub entry_type: EntryType,
}

/// Type of a walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file.
    File,

    /// Directory.
    Directory,
}

/// Iterator returned by [`FilteredWalker::walk`].
pub struct Walk<'a> {
    root: &'a Path,
    ignore: &'a IgnoreMatcher,
    output: Option<&'a Handle>,
    inner: walkdir::IntoIter,
}

impl Iterator for Walk<'_> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied)
                    {
                        continue;
                    }
                    return Some(WalkItem::Unreadable {
                        message: err.to_string(),
                    });
                }
            };

            // Sockets, FIFOs and devices are neither archived nor opened.
            let file_type = entry.file_type();
            let entry_type = if file_type.is_dir() {
                EntryType::Directory
            } else if file_type.is_file() {
                EntryType::File
            } else {
                continue;
            };

            let path = entry.into_path();
            let relative_path = path
                .strip_prefix(self.root)
                .map_or_else(|_| path.clone(), Path::to_path_buf);

            let needs_identity = !self.ignore.is_empty()
                || (self.output.is_some() && entry_type == EntryType::File);
            let handle = if needs_identity {
                Handle::from_path(&path).ok()
            } else {
                None
            };

            // An entry that cannot be opened is still compared by stat key.
            if !self.ignore.is_empty() && self.ignore.matches_identity(handle.as_ref(), &path) {
                if entry_type == EntryType::Directory {
                    self.inner.skip_current_dir();
                }
                return Some(WalkItem::Ignored {
                    relative_path,
                    is_dir: entry_type == EntryType::Directory,
                });
            }
            if entry_type == EntryType::File && handle.is_some() && self.output == handle.as_ref() {
                return Some(WalkItem::OutputArchive { relative_path });
            }

            return Some(WalkItem::Entry(FilteredEntry {
                path,
                relative_path,
                entry_type,
            }));
        }
    }
}
