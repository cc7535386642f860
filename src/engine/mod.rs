pub mod errors;
pub mod outcome;
pub mod run_config;
pub mod runner;

pub use errors::{FileError, ListError, RunError};
pub use outcome::{EditOutcome, EditStatus, RunSummary};
pub use run_config::RunConfig;
pub use runner::{derived_path, edit_file, resolve_targets, run};
