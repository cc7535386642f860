use crate::rules::{ConfigError, RuleSet};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Everything one run needs, fixed before any file is touched.
#[derive(Debug, Clone)]
pub struct RunConfig {
    target: PathBuf,
    rules: RuleSet,
    exclude: Option<Regex>,
    verbose: bool,
}

impl RunConfig {
    pub fn new(target: impl Into<PathBuf>, rules: RuleSet) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        Ok(Self {
            target: target.into(),
            rules,
            exclude: None,
            verbose: false,
        })
    }

    /// Skip files whose full path matches `pattern`. An empty pattern
    /// disables exclusion.
    pub fn with_exclude(mut self, pattern: Option<&str>) -> Result<Self, ConfigError> {
        self.exclude = match pattern {
            Some(pattern) if !pattern.is_empty() => Some(Regex::new(pattern).map_err(|source| {
                ConfigError::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?),
            _ => None,
        };
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&path.to_string_lossy()))
    }
}
