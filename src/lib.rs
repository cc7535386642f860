//! svg-quick-edit: batch attribute edits for SVG path elements
//!
//! Applies an ordered set of find/replace rules to every `<path>` element of
//! an SVG file, or of every SVG file directly inside a directory, and saves
//! each changed document under a new name built from the rules that matched.
//!
//! # Architecture
//!
//! - [`rules`]: selectors, rules and the rule-set shape check.
//! - [`svg`]: parse, query, mutate and serialize one document.
//! - [`engine`]: resolves the target, edits each file, aggregates outcomes.
//! - [`fs`] and [`sink`]: the filesystem and log capabilities the engine is
//!   given, so it can run against memory in tests.
//! - [`config`]: optional TOML rules file.
//!
//! # Example
//!
//! ```no_run
//! use svg_quick_edit::engine::{run, RunConfig};
//! use svg_quick_edit::fs::OsFileSystem;
//! use svg_quick_edit::rules::RuleSet;
//! use svg_quick_edit::sink::{StderrSink, StdoutSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rules = RuleSet::from_parallel(
//!     &["class='aac-skin-fill'"],
//!     &["fill"],
//!     &["#e3ab72"],
//!     &["skin-e3ab72"],
//! )?;
//! let config = RunConfig::new("icons/", rules)?.with_verbose(true);
//!
//! let summary = run(&config, &OsFileSystem, &StdoutSink, &StderrSink)?;
//! println!("edited {} files", summary.edited);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod fs;
pub mod rules;
pub mod sink;
pub mod svg;

// Re-exports
pub use engine::{
    derived_path, edit_file, run, EditOutcome, EditStatus, FileError, ListError, RunConfig,
    RunError, RunSummary,
};
pub use fs::{DirEntry, FileSystem, MemoryFileSystem, OsFileSystem};
pub use rules::{ConfigError, EditRule, RuleSet, Selector};
pub use sink::{CaptureSink, LogSink, StderrSink, StdoutSink};
pub use svg::{SvgDocument, SvgError, SVG_EXTENSION};
