//! Reading rules files from disk.

use crate::config::schema::{RulesFile, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A rules file that could not be turned into rules.
///
/// Errors from [`load_from_str`] name no file; [`load_from_path`] reports the
/// file in every variant.
#[derive(Error, Debug)]
pub enum RulesFileError {
    #[error("failed to read rules file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid rules file{}: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

pub fn load_from_str(input: &str) -> Result<RulesFile, RulesFileError> {
    parse_rules(input, None)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RulesFile, RulesFileError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| RulesFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&contents, Some(path))
}

fn parse_rules(input: &str, path: Option<&Path>) -> Result<RulesFile, RulesFileError> {
    let file: RulesFile = toml_edit::de::from_str(input).map_err(|source| RulesFileError::Toml {
        path: path.map(Path::to_path_buf),
        source,
    })?;
    file.validate()
        .map_err(|source| RulesFileError::Validation {
            path: path.map(Path::to_path_buf),
            source,
        })?;
    Ok(file)
}
