//! ZIP archive creation.
//!
//! The archiver walks the source directory twice: once to count the files
//! that will be written (so progress percentages are known from the first
//! report on), and once to write them. Extra files are appended after the
//! walk as top-level entries.

use crate::ArchiveError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::config::CreationConfig;
use crate::creation::extra::ExtraFile;
use crate::creation::progress::ProgressTracker;
use crate::creation::walker::EntryType;
use crate::creation::walker::FilteredWalker;
use crate::creation::walker::WalkItem;
use crate::report::CreationReport;
use same_file::Handle;
use std::collections::HashSet;
use std::fs::File;
use std::fs::Metadata;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Mode stamped on entries when the host cannot supply one.
pub const DEFAULT_UNIX_MODE: u32 = 0o755;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Archives `root` into a ZIP file at `output`.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::creation::CreationConfig;
/// use dirzip_core::creation::zip::create_zip;
///
/// let config = CreationConfig::default().with_windows_style(true);
/// let report = create_zip("project.zip", "project", &config)?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), dirzip_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `root` does not exist or is not a directory
/// - The output file cannot be created
/// - An entry name is not valid UTF-8
/// - Writing the archive fails
pub fn create_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    root: Q,
    config: &CreationConfig,
) -> Result<CreationReport> {
    create_zip_with_progress(output, root, config, &mut NoopProgress)
}

/// Archives `root` into a ZIP file at `output`, reporting progress.
///
/// `progress.on_start` receives the number of files that will be written
/// (walked files plus valid extra files whose entry name is not already
/// taken). `on_progress` then fires every 50 files and on the last one.
///
/// # Errors
///
/// Same as [`create_zip`].
pub fn create_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    root: Q,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let output = output.as_ref();
    let root = root.as_ref();

    config.validate()?;
    if !root.exists() {
        return Err(ArchiveError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ArchiveError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    let wrapper = wrapper_folder(root, config.windows_style)?;

    let file = File::create(output).map_err(|source| ArchiveError::OutputCreate {
        path: output.to_path_buf(),
        source,
    })?;
    let output_handle = Handle::from_file(file.try_clone()?)?;

    let (file, mut report) =
        write_archive(file, root, &wrapper, &output_handle, config, progress)?;
    report.bytes_compressed = file.metadata()?.len();
    Ok(report)
}

/// Writes both passes into `writer` and returns it once the archive is
/// finished.
fn write_archive<W: Write + Seek>(
    writer: W,
    root: &Path,
    wrapper: &str,
    output: &Handle,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<(W, CreationReport)> {
    let start = std::time::Instant::now();
    let mut zip = ZipWriter::new(writer);
    let mut report = CreationReport::default();
    let options = base_options(config);

    let ignore = config.ignore.resolve(root);
    let walker = FilteredWalker::new(root, &ignore).with_output(Some(output));

    let mut claimed = walked_file_names(&walker, wrapper)?;
    let walked_files = claimed.len();
    let extras_to_add = config
        .extra_files
        .iter()
        .filter(|extra| {
            is_addable_extra(extra, output) && claimed.insert(extra.entry_name.clone())
        })
        .count();
    let total = walked_files + extras_to_add;
    let mut tracker = ProgressTracker::new(progress, total);

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut written: HashSet<String> = HashSet::new();

    for item in walker.walk() {
        match item {
            WalkItem::Entry(entry) => match entry.entry_type {
                EntryType::File => {
                    let name = archive_entry_name(wrapper, &entry.relative_path)?;
                    if add_file_to_zip(
                        &mut zip,
                        &entry.path,
                        name.clone(),
                        options,
                        config,
                        &mut buffer,
                        &mut report,
                    )? {
                        written.insert(name);
                        tracker.on_file_complete();
                    }
                }
                EntryType::Directory => {
                    let name = format!("{}/", archive_entry_name(wrapper, &entry.relative_path)?);
                    let metadata = std::fs::metadata(&entry.path).ok();
                    let dir_options = entry_options(options, metadata.as_ref(), config);
                    zip.add_directory(name, dir_options)?;
                    report.directories_added += 1;
                }
            },
            WalkItem::Ignored { relative_path, .. } => {
                report.ignored.push(relative_path);
            }
            WalkItem::OutputArchive { relative_path } => {
                report.files_skipped += 1;
                report.add_warning(format!(
                    "Skipped output archive found in source tree: {}",
                    relative_path.display()
                ));
            }
            WalkItem::Unreadable { message } => {
                report.add_warning(format!("Skipped unreadable entry: {message}"));
            }
        }
    }

    for extra in &config.extra_files {
        if !extra.source.is_file() {
            continue;
        }
        if is_output(&extra.source, output) {
            report.files_skipped += 1;
            report.add_warning(format!(
                "Skipped extra file that is the output archive: {}",
                extra.source.display()
            ));
            continue;
        }
        if written.contains(&extra.entry_name) {
            report.files_skipped += 1;
            report.add_warning(format!(
                "Skipped extra file {}: entry {} already exists in the archive",
                extra.source.display(),
                extra.entry_name
            ));
            continue;
        }
        if add_file_to_zip(
            &mut zip,
            &extra.source,
            extra.entry_name.clone(),
            options,
            config,
            &mut buffer,
            &mut report,
        )? {
            written.insert(extra.entry_name.clone());
            tracker.on_file_complete();
        }
    }

    let writer = zip.finish()?;

    report.duration = start.elapsed();
    tracker.on_complete();

    Ok((writer, report))
}

/// Entry names of the files the write pass will add from the walk.
fn walked_file_names(walker: &FilteredWalker<'_>, wrapper: &str) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for item in walker.walk() {
        if let WalkItem::Entry(entry) = item
            && entry.entry_type == EntryType::File
        {
            names.insert(archive_entry_name(wrapper, &entry.relative_path)?);
        }
    }
    Ok(names)
}

/// Adds one file entry. Returns `Ok(false)` if the source could not be
/// opened, which is recorded in the report instead of aborting the run.
fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    file_path: &Path,
    archive_name: String,
    options: SimpleFileOptions,
    config: &CreationConfig,
    buffer: &mut [u8],
    report: &mut CreationReport,
) -> Result<bool> {
    let mut file = match File::open(file_path) {
        Ok(file) => file,
        Err(e) => {
            report.files_skipped += 1;
            report.add_warning(format!("Skipped file {}: {e}", file_path.display()));
            return Ok(false);
        }
    };
    let metadata = file.metadata()?;

    let file_options = entry_options(options, Some(&metadata), config)
        .large_file(metadata.len() >= u64::from(u32::MAX));

    zip.start_file(archive_name, file_options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
    }

    report.files_added += 1;
    report.bytes_written += bytes_written;

    Ok(true)
}

/// Returns `true` when ZIP entries carry the source's Unix mode.
///
/// Decided at compile time: only Unix targets expose a mode through
/// `Metadata`. Builds for other targets stamp [`DEFAULT_UNIX_MODE`].
#[must_use]
pub fn host_has_unix_modes() -> bool {
    cfg!(unix)
}

fn base_options(config: &CreationConfig) -> SimpleFileOptions {
    if config.compression_level == Some(0) {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        let level = config.compression_level.unwrap_or(6);
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

fn entry_options(
    options: SimpleFileOptions,
    metadata: Option<&Metadata>,
    config: &CreationConfig,
) -> SimpleFileOptions {
    if config.stamp_unix_permissions || !host_has_unix_modes() {
        return options.unix_permissions(DEFAULT_UNIX_MODE);
    }
    metadata
        .and_then(source_mode)
        .map_or(options, |mode| options.unix_permissions(mode))
}

#[cfg(unix)]
fn source_mode(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn source_mode(_metadata: &Metadata) -> Option<u32> {
    None
}

fn is_output(path: &Path, output: &Handle) -> bool {
    Handle::from_path(path).is_ok_and(|handle| &handle == output)
}

fn is_addable_extra(extra: &ExtraFile, output: &Handle) -> bool {
    extra.source.is_file() && !is_output(&extra.source, output)
}

/// `<root name>/` in wrapper style, otherwise empty.
///
/// Roots spelled without a final name (`..`) fall back to the name of the
/// canonical path.
fn wrapper_folder(root: &Path, windows_style: bool) -> Result<String> {
    if !windows_style {
        return Ok(String::new());
    }
    let name = root.file_name().map(ToOwned::to_owned).or_else(|| {
        root.canonicalize()
            .ok()
            .and_then(|canonical| canonical.file_name().map(ToOwned::to_owned))
    });
    match name {
        Some(name) => name
            .to_str()
            .map(|name| format!("{name}/"))
            .ok_or_else(|| ArchiveError::NonUtf8Path {
                path: root.to_path_buf(),
            }),
        None => Ok(String::new()),
    }
}

/// Joins the components of `relative` with `/` behind `prefix`.
///
/// ZIP entry names always use forward slashes, whatever the host separator.
fn archive_entry_name(prefix: &str, relative: &Path) -> Result<String> {
    let mut name = String::from(prefix);
    for (idx, component) in relative.components().enumerate() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ArchiveError::NonUtf8Path {
                path: relative.to_path_buf(),
            })?;
        if idx > 0 {
            name.push('/');
        }
        name.push_str(part);
    }
    Ok(name)
}
