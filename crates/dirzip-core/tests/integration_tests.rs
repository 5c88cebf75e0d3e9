//! Integration tests for dirzip-core.
//!
//! These tests build real directory trees, archive them, and read the result
//! back with `zip::ZipArchive`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dirzip_core::ArchiveError;
use dirzip_core::CreationReport;
use dirzip_core::ProgressCallback;
use dirzip_core::create_zip;
use dirzip_core::create_zip_with_progress;
use dirzip_core::creation::ArchiveCreator;
use dirzip_core::creation::CreationConfig;
use dirzip_core::creation::IgnoreSet;
use dirzip_core::creation::resolve_extra_files;
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

/// Reads every entry of an archive into name -> contents (directories map to
/// `None`).
fn read_archive(path: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        if entry.is_dir() {
            entries.insert(name, None);
        } else {
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            entries.insert(name, Some(data));
        }
    }
    entries
}

fn names(entries: &BTreeMap<String, Option<Vec<u8>>>) -> Vec<&str> {
    entries.keys().map(String::as_str).collect()
}

fn file_entry_count(entries: &BTreeMap<String, Option<Vec<u8>>>) -> usize {
    entries.values().filter(|v| v.is_some()).count()
}

/// `a.txt`, `sub/b.txt`, empty `sub/empty/`.
fn scenario_tree(root: &Path) {
    fs::create_dir_all(root.join("sub/empty")).unwrap();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("sub/b.txt"), "bravo").unwrap();
}

#[test]
fn test_scenario_ignore_single_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    let output = temp.path().join("out.zip");

    let config = CreationConfig::default().with_ignore(IgnoreSet::new(["sub/b.txt"]));
    let report = create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert_eq!(names(&entries), vec!["a.txt", "sub/", "sub/empty/"]);
    assert_eq!(report.files_added, 1);
    assert_eq!(report.files_added, file_entry_count(&entries));
    assert_eq!(report.ignored, vec![PathBuf::from("sub/b.txt")]);
}

#[test]
fn test_round_trip_reproduces_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    fs::create_dir_all(root.join("deep/er/still")).unwrap();
    fs::write(root.join("deep/er/still/leaf.bin"), [0u8, 1, 2, 255]).unwrap();
    let output = temp.path().join("out.zip");

    let report = create_zip(&output, &root, &CreationConfig::default()).unwrap();

    let entries = read_archive(&output);
    assert_eq!(entries["a.txt"].as_deref(), Some(b"alpha".as_slice()));
    assert_eq!(entries["sub/b.txt"].as_deref(), Some(b"bravo".as_slice()));
    assert_eq!(
        entries["deep/er/still/leaf.bin"].as_deref(),
        Some([0u8, 1, 2, 255].as_slice())
    );
    assert_eq!(entries["sub/empty/"], None);
    assert_eq!(report.files_added, 3);
    assert_eq!(report.directories_added, 5);
    assert_eq!(report.bytes_written, 14);
}

#[test]
fn test_ignored_directory_prunes_subtree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    fs::create_dir_all(root.join("node_modules/pkg/lib")).unwrap();
    fs::write(root.join("node_modules/pkg/lib/index.js"), "x").unwrap();
    let output = temp.path().join("out.zip");

    let config = CreationConfig::default().with_ignore(IgnoreSet::new(["node_modules"]));
    create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert!(entries.keys().all(|name| !name.starts_with("node_modules")));
    assert!(entries.contains_key("sub/b.txt"));
}

#[test]
fn test_wrapper_prefix_applies_to_walk_entries_only() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("work");
    let root = cwd.join("project");
    scenario_tree(&root);
    fs::write(cwd.join("LICENSE"), "mit").unwrap();
    let output = cwd.join("out.zip");

    let extras = resolve_extra_files(&["LICENSE"], &cwd).unwrap();
    let config = CreationConfig::default()
        .with_windows_style(true)
        .with_extra_files(extras);
    let report = create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert_eq!(
        names(&entries),
        vec![
            "LICENSE",
            "project/a.txt",
            "project/sub/",
            "project/sub/b.txt",
            "project/sub/empty/",
        ]
    );
    assert_eq!(report.files_added, 3);
}

#[test]
fn test_extra_file_outside_cwd_uses_bare_name() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("work");
    let root = cwd.join("project");
    scenario_tree(&root);
    let elsewhere = temp.path().join("elsewhere");
    fs::create_dir(&elsewhere).unwrap();
    fs::write(elsewhere.join("notes.md"), "# notes").unwrap();
    fs::create_dir(cwd.join("docs")).unwrap();
    fs::write(cwd.join("docs/guide.md"), "# guide").unwrap();
    let output = cwd.join("out.zip");

    let extras =
        resolve_extra_files(&["../elsewhere/notes.md", "docs/guide.md"], &cwd).unwrap();
    let config = CreationConfig::default().with_extra_files(extras);
    create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert_eq!(entries["notes.md"].as_deref(), Some(b"# notes".as_slice()));
    assert_eq!(entries["docs/guide.md"].as_deref(), Some(b"# guide".as_slice()));
}

#[test]
fn test_missing_extra_file_is_rejected_up_front() {
    let temp = TempDir::new().unwrap();
    let err = resolve_extra_files(&["missing.txt"], temp.path()).unwrap_err();
    assert!(matches!(err, ArchiveError::ExtraFileNotFound { .. }));
    assert!(err.is_config_error());
}

#[test]
fn test_archive_never_contains_itself() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    let output = root.join("self.zip");

    let report = create_zip(&output, &root, &CreationConfig::default()).unwrap();

    let entries = read_archive(&output);
    assert!(!entries.contains_key("self.zip"));
    assert_eq!(report.files_added, file_entry_count(&entries));
    assert_eq!(report.files_skipped, 1);
    assert!(report.has_warnings());
}

#[test]
fn test_overwrites_existing_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    let output = temp.path().join("out.zip");
    fs::write(&output, "stale bytes that are not a zip").unwrap();

    create_zip(&output, &root, &CreationConfig::default()).unwrap();

    assert_eq!(file_entry_count(&read_archive(&output)), 2);
}

#[test]
fn test_empty_directory_produces_empty_archive() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("empty");
    fs::create_dir(&root).unwrap();
    let output = temp.path().join("out.zip");

    let report = create_zip(&output, &root, &CreationConfig::default()).unwrap();

    assert_eq!(report.total_entries(), 0);
    assert!(read_archive(&output).is_empty());
}

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    reports: Vec<usize>,
    completed: bool,
}

impl ProgressCallback for Recorder {
    fn on_start(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn on_progress(&mut self, percent: usize) {
        self.reports.push(percent);
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}

#[test]
fn test_progress_cadence_over_real_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("many");
    fs::create_dir(&root).unwrap();
    for i in 0..119 {
        fs::write(root.join(format!("f{i:03}.txt")), "x").unwrap();
    }
    let cwd = temp.path();
    fs::write(cwd.join("extra.txt"), "e").unwrap();
    let extras = resolve_extra_files(&["extra.txt"], cwd).unwrap();
    let output = temp.path().join("out.zip");

    let mut recorder = Recorder::default();
    let config = CreationConfig::default().with_extra_files(extras);
    let report = create_zip_with_progress(&output, &root, &config, &mut recorder).unwrap();

    assert_eq!(recorder.total, Some(120));
    assert_eq!(recorder.reports, vec![41, 83, 100]);
    assert!(recorder.completed);
    assert_eq!(report.files_added, 120);
}

#[test]
fn test_extra_colliding_with_walked_entry_is_skipped() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("work");
    let root = cwd.join("dist");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("README.md"), "bundled").unwrap();
    fs::write(root.join("app.bin"), "bin").unwrap();
    fs::write(cwd.join("README.md"), "top level").unwrap();
    fs::write(cwd.join("LICENSE"), "mit").unwrap();
    let output = cwd.join("out.zip");

    let extras = resolve_extra_files(&["README.md", "LICENSE", "LICENSE"], &cwd).unwrap();
    let mut recorder = Recorder::default();
    let config = CreationConfig::default().with_extra_files(extras);
    let report = create_zip_with_progress(&output, &root, &config, &mut recorder).unwrap();

    let entries = read_archive(&output);
    assert_eq!(names(&entries), vec!["LICENSE", "README.md", "app.bin"]);
    assert_eq!(entries["README.md"].as_deref(), Some(b"bundled".as_slice()));
    assert_eq!(report.files_added, 3);
    assert_eq!(report.files_skipped, 2);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(recorder.total, Some(3));
    assert_eq!(recorder.reports, vec![100]);
}

#[test]
fn test_extra_removed_after_resolving_is_skipped_silently() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("work");
    let root = cwd.join("project");
    scenario_tree(&root);
    fs::write(cwd.join("gone.txt"), "soon deleted").unwrap();
    let extras = resolve_extra_files(&["gone.txt"], &cwd).unwrap();
    fs::remove_file(cwd.join("gone.txt")).unwrap();
    let output = cwd.join("out.zip");

    let mut recorder = Recorder::default();
    let config = CreationConfig::default().with_extra_files(extras);
    let report = create_zip_with_progress(&output, &root, &config, &mut recorder).unwrap();

    assert!(!read_archive(&output).contains_key("gone.txt"));
    assert_eq!(report.files_added, 2);
    assert_eq!(report.files_skipped, 0);
    assert!(!report.has_warnings());
    assert_eq!(recorder.total, Some(2));
    assert_eq!(recorder.reports, vec![100]);
}

#[test]
fn test_extra_that_is_the_output_archive_is_skipped() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().join("work");
    let root = cwd.join("project");
    scenario_tree(&root);
    let output = cwd.join("out.zip");
    fs::write(&output, "previous run").unwrap();
    let extras = resolve_extra_files(&["out.zip"], &cwd).unwrap();

    let config = CreationConfig::default().with_extra_files(extras);
    let report = create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert!(!entries.contains_key("out.zip"));
    assert_eq!(report.files_added, 2);
    assert_eq!(report.files_skipped, 1);
    assert!(report.warnings[0].contains("output archive"));
}

#[test]
fn test_builder_matches_function_api() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    let via_fn = temp.path().join("fn.zip");
    let via_builder = temp.path().join("builder.zip");

    let config = CreationConfig::default()
        .with_ignore(IgnoreSet::new(["sub/empty"]))
        .with_compression_level(0);
    let expected: CreationReport = create_zip(&via_fn, &root, &config).unwrap();
    let report = ArchiveCreator::new()
        .output(&via_builder)
        .source(&root)
        .ignore("sub/empty")
        .compression_level(0)
        .create()
        .unwrap();

    assert_eq!(report.files_added, expected.files_added);
    assert_eq!(names(&read_archive(&via_fn)), names(&read_archive(&via_builder)));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_followed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    let shared = temp.path().join("shared");
    fs::create_dir(&shared).unwrap();
    fs::write(shared.join("common.txt"), "common").unwrap();
    std::os::unix::fs::symlink(&shared, root.join("linked")).unwrap();
    let output = temp.path().join("out.zip");

    create_zip(&output, &root, &CreationConfig::default()).unwrap();

    let entries = read_archive(&output);
    assert_eq!(
        entries["linked/common.txt"].as_deref(),
        Some(b"common".as_slice())
    );
}

#[cfg(unix)]
#[test]
fn test_ignore_matches_through_symlink() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    scenario_tree(&root);
    std::os::unix::fs::symlink(root.join("a.txt"), root.join("alias.txt")).unwrap();
    let output = temp.path().join("out.zip");

    let config = CreationConfig::default().with_ignore(IgnoreSet::new(["a.txt"]));
    create_zip(&output, &root, &config).unwrap();

    let entries = read_archive(&output);
    assert!(!entries.contains_key("a.txt"));
    assert!(!entries.contains_key("alias.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_ignored_directory_never_reaches_archive() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("secret")).unwrap();
    fs::write(root.join("secret/key.pem"), "key").unwrap();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::set_permissions(root.join("secret"), fs::Permissions::from_mode(0o000)).unwrap();
    let output = temp.path().join("out.zip");

    let config = CreationConfig::default().with_ignore(IgnoreSet::new(["secret"]));
    let result = create_zip(&output, &root, &config);
    fs::set_permissions(root.join("secret"), fs::Permissions::from_mode(0o755)).unwrap();
    let report = result.unwrap();

    let entries = read_archive(&output);
    assert_eq!(names(&entries), vec!["a.txt"]);
    assert_eq!(report.ignored, vec![PathBuf::from("secret")]);
}
