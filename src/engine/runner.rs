//! Batch edit engine.
//!
//! Resolves the target into a list of SVG files, applies every rule to each
//! file in turn and writes a derived file for each one that changed:
//!
//! - A target ending in `.svg` is a single file; anything else is a directory
//!   whose immediate `.svg` children are edited in name order.
//! - Per-file failures are logged and counted; the batch continues.
//! - A directory that cannot be listed ends the run with one error.

use crate::engine::errors::{FileError, ListError, RunError};
use crate::engine::outcome::{EditOutcome, EditStatus, RunSummary};
use crate::engine::run_config::RunConfig;
use crate::fs::FileSystem;
use crate::sink::LogSink;
use crate::svg::{SvgDocument, SVG_EXTENSION};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Edit every file the config targets.
///
/// Returns the summary when no error was reported. Otherwise returns
/// [`RunError::Failed`] carrying the same summary; successful edits are kept
/// either way.
pub fn run(
    config: &RunConfig,
    fs: &dyn FileSystem,
    info: &dyn LogSink,
    error: &dyn LogSink,
) -> Result<RunSummary, RunError> {
    let mut summary = RunSummary::default();

    debug!(
        path = %config.target().display(),
        rules = config.rules().len(),
        "starting SVG edit run"
    );

    let files = match resolve_targets(config.target(), fs) {
        Ok(files) => files,
        Err(err) => {
            error.log(&err.to_string());
            summary.record_error();
            return Err(RunError::Failed {
                errors: summary.errors,
                summary,
            });
        }
    };

    debug!(count = files.len(), "resolved SVG files");

    for file in files {
        match edit_file(&file, config, fs) {
            Ok(outcome) => {
                if config.verbose() {
                    info.log(&outcome.to_string());
                }
                summary.record(&outcome);
            }
            Err(err) => {
                error.log(&err.to_string());
                summary.record_error();
            }
        }
    }

    if summary.errors > 0 {
        return Err(RunError::Failed {
            errors: summary.errors,
            summary,
        });
    }

    if config.verbose() {
        info.log(&summary.to_string());
    }

    Ok(summary)
}

/// The files a run will visit, in processing order.
pub fn resolve_targets(target: &Path, fs: &dyn FileSystem) -> Result<Vec<PathBuf>, ListError> {
    if has_svg_extension(&target.to_string_lossy()) {
        return Ok(vec![target.to_path_buf()]);
    }

    let entries = fs.list_dir(target).map_err(|source| ListError {
        path: target.to_path_buf(),
        source,
    })?;

    Ok(entries
        .into_iter()
        .filter(|entry| !entry.is_dir && has_svg_extension(&entry.name))
        .map(|entry| target.join(entry.name))
        .collect())
}

/// Apply all rules to one file and write the derived file if any rule fired.
pub fn edit_file(
    path: &Path,
    config: &RunConfig,
    fs: &dyn FileSystem,
) -> Result<EditOutcome, FileError> {
    if config.is_excluded(path) {
        debug!(file = %path.display(), "excluded by pattern");
        return Ok(EditOutcome::excluded(path.to_path_buf()));
    }

    let content = fs.read(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut document = SvgDocument::from_bytes(&content).map_err(|source| FileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(file = %path.display(), paths = document.path_count(), "parsed SVG file");

    let rules = config.rules();
    let mut fired = vec![false; rules.len()];
    for (idx, rule) in rules.iter().enumerate() {
        let matched = document.apply_rule(rule);
        debug!(
            file = %path.display(),
            rule = idx,
            selector = %rule.selector,
            matched,
            "applied rule"
        );
        fired[idx] = matched > 0;
    }

    let applied_rules: BTreeSet<usize> = fired
        .iter()
        .enumerate()
        .filter_map(|(idx, fired)| fired.then_some(idx))
        .collect();

    let suffix = rules.suffix_for(&fired);
    if suffix.is_empty() {
        return Ok(EditOutcome {
            path: path.to_path_buf(),
            status: EditStatus::Unchanged,
            applied_rules,
        });
    }

    let output = derived_path(path, &suffix);
    let bytes = document.serialize().map_err(|source| FileError::Serialize {
        path: output.clone(),
        source,
    })?;
    fs.write(&output, &bytes).map_err(|source| FileError::Write {
        path: output.clone(),
        source,
    })?;

    Ok(EditOutcome {
        path: path.to_path_buf(),
        status: EditStatus::Modified { output },
        applied_rules,
    })
}

/// Insert `suffix` right before the last `.svg` in the file name.
///
/// `icons/face.svg` with `_skin_hair` becomes `icons/face_skin_hair.svg`.
pub fn derived_path(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let derived = match name.rfind(SVG_EXTENSION) {
        Some(idx) => format!("{}{}{}", &name[..idx], suffix, &name[idx..]),
        None => format!("{}{}", name, suffix),
    };

    path.with_file_name(derived)
}

fn has_svg_extension(name: &str) -> bool {
    name.ends_with(SVG_EXTENSION)
}
