//! Integration tests for the batch edit engine
//!
//! Runs whole edit batches against the in-memory filesystem with capturing
//! log sinks.

use std::cell::Cell;
use std::io;
use std::path::Path;
use svg_quick_edit::engine::{run, RunConfig, RunError};
use svg_quick_edit::fs::{DirEntry, FileSystem, MemoryFileSystem};
use svg_quick_edit::rules::{ConfigError, RuleSet};
use svg_quick_edit::sink::CaptureSink;

const TEST_CLASS: &str = r##"<svg><path class="test-class" fill="#ffffff" /></svg>"##;

struct Harness {
    fs: MemoryFileSystem,
    info: CaptureSink,
    errors: CaptureSink,
}

impl Harness {
    fn new() -> Self {
        Self {
            fs: MemoryFileSystem::new(),
            info: CaptureSink::new(),
            errors: CaptureSink::new(),
        }
    }

    fn run(&self, config: &RunConfig) -> Result<svg_quick_edit::RunSummary, RunError> {
        run(config, &self.fs, &self.info, &self.errors)
    }

    fn assert_contains(&self, path: &str, needles: &[&str]) {
        let content = self
            .fs
            .contents(path)
            .unwrap_or_else(|| panic!("File should exist: {path}"));
        for needle in needles {
            assert!(
                content.contains(needle),
                "{path} should contain {needle}: {content}"
            );
        }
    }

    fn assert_not_contains(&self, path: &str, needles: &[&str]) {
        let content = self
            .fs
            .contents(path)
            .unwrap_or_else(|| panic!("File should exist: {path}"));
        for needle in needles {
            assert!(
                !content.contains(needle),
                "{path} should not contain {needle}: {content}"
            );
        }
    }
}

fn rules(finds: &[&str], replaces: &[&str], values: &[&str], suffixes: &[&str]) -> RuleSet {
    RuleSet::from_parallel(finds, replaces, values, suffixes).unwrap()
}

#[test]
fn test_single_svg_file() {
    let h = Harness::new();
    h.fs.add_file("/test.svg", TEST_CLASS);

    let config = RunConfig::new(
        "/test.svg",
        rules(&["class='test-class'"], &["fill"], &["#000000"], &["modified"]),
    )
    .unwrap();

    let summary = h.run(&config).unwrap();

    assert_eq!(summary.edited, 1);
    h.assert_contains("/test_modified.svg", &[r##"fill="#000000""##]);
    h.assert_not_contains("/test_modified.svg", &["#ffffff"]);
    // the source is left alone
    assert_eq!(h.fs.contents("/test.svg").as_deref(), Some(TEST_CLASS));
}

#[test]
fn test_directory_with_svg_files() {
    let h = Harness::new();
    h.fs.create_dir("/svg-files");
    h.fs.add_file("/svg-files/file1.svg", TEST_CLASS);
    h.fs.add_file("/svg-files/file2.svg", TEST_CLASS);

    let config = RunConfig::new(
        "/svg-files",
        rules(&["class='test-class'"], &["fill"], &["#123456"], &["updated"]),
    )
    .unwrap();

    let summary = h.run(&config).unwrap();

    assert_eq!(summary.edited, 2);
    h.assert_contains("/svg-files/file1_updated.svg", &[r##"fill="#123456""##]);
    h.assert_contains("/svg-files/file2_updated.svg", &[r##"fill="#123456""##]);
}

#[test]
fn test_exclude_files() {
    let h = Harness::new();
    h.fs.create_dir("/exclude-test");
    h.fs.add_file("/exclude-test/include.svg", TEST_CLASS);
    h.fs.add_file("/exclude-test/exclude.svg", TEST_CLASS);

    let config = RunConfig::new(
        "/exclude-test",
        rules(&["class='test-class'"], &["fill"], &["#654321"], &["modified"]),
    )
    .unwrap()
    .with_exclude(Some(r"exclude\.svg"))
    .unwrap();

    let summary = h.run(&config).unwrap();

    assert!(h.fs.exists("/exclude-test/include_modified.svg"));
    assert!(!h.fs.exists("/exclude-test/exclude_modified.svg"));
    assert_eq!(summary.edited, 1);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.excluded, 1);
}

#[test]
fn test_multiple_find_and_replaces() {
    let h = Harness::new();
    let dir = "/multiple-replace-test";
    h.fs.create_dir(dir);
    h.fs.add_file(
        format!("{dir}/file1.svg"),
        r##"<svg><path class="a" fill="#ffffff" /></svg>"##,
    );
    h.fs.add_file(
        format!("{dir}/file2.svg"),
        r##"<svg><path class="b" stroke="#ffffff" /></svg>"##,
    );
    h.fs.add_file(
        format!("{dir}/file3.svg"),
        r##"<svg><path class="a" fill="#ffffff" /><path class="b" stroke="#ffffff" /></svg>"##,
    );
    h.fs.add_file(
        format!("{dir}/file4.svg"),
        r##"<svg><path class="c" fill="#ffffff" /></svg>"##,
    );

    let config = RunConfig::new(
        dir,
        rules(
            &["class='a'", "class='b'"],
            &["fill", "stroke"],
            &["#111111", "#222222"],
            &["a-modified", "b-modified"],
        ),
    )
    .unwrap();

    let summary = h.run(&config).unwrap();
    assert_eq!(summary.edited, 3);
    assert_eq!(summary.unchanged, 1);

    let variants = ["_a-modified", "_b-modified", "_a-modified_b-modified"];
    let expected = [
        ("file1", [true, false, false]),
        ("file2", [false, true, false]),
        ("file3", [false, false, true]),
        ("file4", [false, false, false]),
    ];
    for (stem, exists) in expected {
        for (variant, should_exist) in variants.iter().zip(exists) {
            let path = format!("{dir}/{stem}{variant}.svg");
            assert_eq!(h.fs.exists(&path), should_exist, "{path}");
        }
    }

    let file1 = format!("{dir}/file1_a-modified.svg");
    h.assert_contains(&file1, &[r##"fill="#111111""##]);
    h.assert_not_contains(&file1, &[r##"stroke="#222222""##]);

    let file2 = format!("{dir}/file2_b-modified.svg");
    h.assert_contains(&file2, &[r##"stroke="#222222""##]);
    h.assert_not_contains(&file2, &[r##"fill="#111111""##]);

    h.assert_contains(
        &format!("{dir}/file3_a-modified_b-modified.svg"),
        &[r##"fill="#111111""##, r##"stroke="#222222""##],
    );
}

#[test]
fn test_later_rule_wins_on_same_attribute() {
    let h = Harness::new();
    h.fs.add_file(
        "/overlap.svg",
        r##"<svg><path class="skin" id="face" fill="#ffffff" /></svg>"##,
    );

    let config = RunConfig::new(
        "/overlap.svg",
        rules(
            &["class='skin'", "id='face'"],
            &["fill", "fill"],
            &["#111111", "#222222"],
            &["first", "second"],
        ),
    )
    .unwrap();

    h.run(&config).unwrap();

    let output = "/overlap_first_second.svg";
    h.assert_contains(output, &[r##"fill="#222222""##]);
    h.assert_not_contains(output, &["#111111", "#ffffff"]);
}

#[test]
fn test_rule_with_no_matches_is_left_out_of_suffix() {
    let h = Harness::new();
    h.fs.add_file("/partial.svg", TEST_CLASS);

    let config = RunConfig::new(
        "/partial.svg",
        rules(
            &["class='missing'", "class='test-class'", "id='nope'"],
            &["fill", "stroke", "fill"],
            &["#000000", "#abcdef", "#000000"],
            &["one", "two", "three"],
        ),
    )
    .unwrap();

    h.run(&config).unwrap();

    assert_eq!(
        h.fs.file_paths(),
        vec![
            Path::new("/partial.svg").to_path_buf(),
            Path::new("/partial_two.svg").to_path_buf(),
        ]
    );
    h.assert_contains(
        "/partial_two.svg",
        &[r##"stroke="#abcdef""##, r##"fill="#ffffff""##],
    );
}

#[test]
fn test_existing_derived_file_is_overwritten() {
    let h = Harness::new();
    h.fs.add_file("/icon.svg", TEST_CLASS);
    h.fs.add_file("/icon_dark.svg", "stale");

    let config = RunConfig::new(
        "/icon.svg",
        rules(&["class='test-class'"], &["fill"], &["#000000"], &["dark"]),
    )
    .unwrap();

    h.run(&config).unwrap();
    h.assert_contains("/icon_dark.svg", &[r##"fill="#000000""##]);
    h.assert_not_contains("/icon_dark.svg", &["stale"]);
}

#[test]
fn test_file_not_found() {
    let h = Harness::new();

    let config = RunConfig::new(
        "/not-found.svg",
        rules(&["class='test-class'"], &["fill"], &["#000000"], &["modified"]),
    )
    .unwrap();

    let err = h.run(&config).unwrap_err();
    assert!(err
        .to_string()
        .contains("encountered 1 error while editing SVG files"));

    let lines = h.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("failed to open SVG file"));
}

#[test]
fn test_directory_not_found() {
    let h = Harness::new();

    let config = RunConfig::new(
        "/not-found",
        rules(&["class='test-class'"], &["fill"], &["#000000"], &["modified"]),
    )
    .unwrap();

    let err = h.run(&config).unwrap_err();
    assert!(err
        .to_string()
        .contains("encountered 1 error while editing SVG files"));
    assert_eq!(err.summary().errors, 1);

    let lines = h.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Failed to read directory"));
}

#[test]
fn test_errors_do_not_stop_the_batch() {
    let h = Harness::new();
    h.fs.create_dir("/batch");
    h.fs.add_file("/batch/a-broken.svg", "<svg><path class=\"test-class\">");
    h.fs.add_file("/batch/b-good.svg", TEST_CLASS);
    h.fs.add_file("/batch/c-broken.svg", "<svg></g></svg>");
    h.fs.add_file("/batch/d-good.svg", TEST_CLASS);

    let config = RunConfig::new(
        "/batch",
        rules(&["class='test-class'"], &["fill"], &["#000000"], &["x"]),
    )
    .unwrap();

    let err = h.run(&config).unwrap_err();

    assert_eq!(
        err.to_string(),
        "encountered 2 errors while editing SVG files"
    );
    assert_eq!(err.summary().edited, 2);
    assert!(h.fs.exists("/batch/b-good_x.svg"));
    assert!(h.fs.exists("/batch/d-good_x.svg"));
    assert!(!h.fs.exists("/batch/a-broken_x.svg"));
    assert!(!h.fs.exists("/batch/c-broken_x.svg"));

    let lines = h.errors.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("/batch/a-broken.svg"));
    assert!(lines[1].contains("/batch/c-broken.svg"));
}

/// Filesystem that counts every call and refuses all of them.
#[derive(Default)]
struct CountingFileSystem {
    calls: Cell<usize>,
}

impl FileSystem for CountingFileSystem {
    fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        Err(io::Error::new(io::ErrorKind::Other, "unexpected read"))
    }

    fn list_dir(&self, _path: &Path) -> io::Result<Vec<DirEntry>> {
        self.calls.set(self.calls.get() + 1);
        Err(io::Error::new(io::ErrorKind::Other, "unexpected list"))
    }

    fn write(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
        self.calls.set(self.calls.get() + 1);
        Err(io::Error::new(io::ErrorKind::Other, "unexpected write"))
    }
}

#[test]
fn test_non_equal_arguments_count() {
    let cases: [(&[&str], &[&str], &[&str], &[&str]); 4] = [
        (
            &["class='test-class'", "class='another-class'"],
            &["fill"],
            &["#000000"],
            &["modified"],
        ),
        (
            &["class='test-class'"],
            &["fill", "stroke"],
            &["#000000"],
            &["modified"],
        ),
        (
            &["class='test-class'"],
            &["fill"],
            &["#000000", "#ffffff"],
            &["modified"],
        ),
        (
            &["class='test-class'"],
            &["fill"],
            &["#000000"],
            &["modified", "another-modified"],
        ),
    ];

    let fs = CountingFileSystem::default();
    let info = CaptureSink::new();
    let errors = CaptureSink::new();

    for (finds, replaces, values, suffixes) in cases {
        let result: Result<_, ConfigError> = RuleSet::from_parallel(finds, replaces, values, suffixes)
            .and_then(|rules| RunConfig::new("/not-equal.svg", rules))
            .map(|config| run(&config, &fs, &info, &errors));

        let err = result.unwrap_err();
        assert!(err
            .to_string()
            .contains("the number of find, replace, value, and suffix arguments must be the same"));
    }

    assert_eq!(fs.calls.get(), 0);
    assert!(errors.lines().is_empty());
}

#[test]
fn test_invalid_exclude_pattern_is_a_config_error() {
    let result = RunConfig::new(
        "/icons",
        rules(&["class='a'"], &["fill"], &["#000"], &["x"]),
    )
    .unwrap()
    .with_exclude(Some("[unclosed"));

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidExcludePattern { .. }));
    assert!(err.to_string().contains("[unclosed"));
}
