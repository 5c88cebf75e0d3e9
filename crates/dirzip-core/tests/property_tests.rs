//! Property-based tests for progress cadence, name validation and entry
//! naming.
//!
//! These tests use proptest to generate arbitrary inputs and verify the
//! properties hold across a wide range of cases.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use dirzip_core::ArchiveError;
use dirzip_core::ProgressCallback;
use dirzip_core::create_zip;
use dirzip_core::creation::CreationConfig;
use dirzip_core::creation::progress::PROGRESS_INTERVAL;
use dirzip_core::creation::progress::ProgressTracker;
use dirzip_core::creation::progress::progress_percent;
use dirzip_core::rename::validate_new_name;
use proptest::prelude::*;
use std::fs;
use std::fs::File;
use tempfile::TempDir;
use zip::ZipArchive;

#[derive(Default)]
struct Recorder {
    reports: Vec<usize>,
}

impl ProgressCallback for Recorder {
    fn on_start(&mut self, _total: usize) {}

    fn on_progress(&mut self, percent: usize) {
        self.reports.push(percent);
    }

    fn on_complete(&mut self) {}
}

proptest! {
    /// Reports fire on every multiple of the interval plus the final file.
    #[test]
    fn prop_progress_report_count(total in 1usize..1000) {
        let mut recorder = Recorder::default();
        {
            let mut tracker = ProgressTracker::new(&mut recorder, total);
            for _ in 0..total {
                tracker.on_file_complete();
            }
        }

        let expected = total / PROGRESS_INTERVAL
            + usize::from(total % PROGRESS_INTERVAL != 0);
        prop_assert_eq!(recorder.reports.len(), expected);
        prop_assert_eq!(recorder.reports.last().copied(), Some(100));
    }

    /// Reported percentages never decrease and stay within 0..=100 when the
    /// count is accurate.
    #[test]
    fn prop_progress_monotonic(total in 1usize..1000) {
        let reports: Vec<usize> = (1..=total)
            .filter_map(|processed| progress_percent(processed, total))
            .collect();
        prop_assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(reports.iter().all(|&p| p <= 100));
    }

    /// A zero total never produces a report.
    #[test]
    fn prop_zero_total_silent(processed in 0usize..10_000) {
        prop_assert_eq!(progress_percent(processed, 0), None);
    }

    /// Names free of separators are accepted.
    #[test]
    fn prop_plain_names_accepted(name in "[a-zA-Z0-9_. -]{1,40}") {
        prop_assert!(validate_new_name(&name).is_ok());
    }

    /// Any separator anywhere in the name is rejected.
    #[test]
    fn prop_separator_names_rejected(
        prefix in "[a-z]{0,10}",
        sep in prop::sample::select(vec!['/', '\\', ':']),
        suffix in "[a-z]{0,10}"
    ) {
        let name = format!("{prefix}{sep}{suffix}");
        let result = validate_new_name(&name);
        let is_invalid_name = matches!(result, Err(ArchiveError::InvalidName { .. }));
        prop_assert!(is_invalid_name);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Entry names use forward slashes and mirror the relative path.
    #[test]
    fn prop_entry_names_mirror_tree(
        components in prop::collection::vec("[a-z]{1,8}", 1..5)
    ) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = temp.path().join("root");
        let dir = components.iter().fold(root.clone(), |acc, c| acc.join(c));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("leaf.txt"), "leaf").unwrap();
        let output = temp.path().join("out.zip");

        let report = create_zip(&output, &root, &CreationConfig::default()).unwrap();

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let leaf = format!("{}/leaf.txt", components.join("/"));
        prop_assert!(archive.by_name(&leaf).is_ok(), "missing {}", leaf);
        prop_assert_eq!(report.files_added, 1);
        prop_assert_eq!(report.directories_added, components.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i).unwrap();
            prop_assert!(!entry.name().contains('\\'));
        }
    }
}
