use crate::engine::outcome::RunSummary;
use crate::svg::SvgError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure confined to one file; the batch carries on after it.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to open SVG file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse SVG file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SvgError,
    },

    #[error("failed to serialize modified SVG file {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: SvgError,
    },

    #[error("failed to write modified SVG file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The target directory could not be listed. Ends the run.
#[derive(Error, Debug)]
#[error("Failed to read directory {}: {source}", path.display())]
pub struct ListError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Error, Debug)]
pub enum RunError {
    /// At least one error was reported during the run. Edits that succeeded
    /// before or after the failures have been written.
    #[error("encountered {errors} {} while editing SVG files", error_noun(.errors))]
    Failed { errors: usize, summary: RunSummary },
}

impl RunError {
    pub fn summary(&self) -> &RunSummary {
        match self {
            RunError::Failed { summary, .. } => summary,
        }
    }
}

fn error_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "error"
    } else {
        "errors"
    }
}
