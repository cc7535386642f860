use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// What happened to one file that was edited without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStatus {
    /// Path matched the exclusion pattern; the file was not opened.
    Excluded,
    /// No rule matched any element; nothing was written.
    Unchanged,
    /// At least one rule fired and the derived file was written.
    Modified { output: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "EditOutcome should be recorded in the run summary"]
pub struct EditOutcome {
    pub path: PathBuf,
    pub status: EditStatus,
    /// Indices of the rules that matched at least one element.
    pub applied_rules: BTreeSet<usize>,
}

impl EditOutcome {
    pub fn excluded(path: PathBuf) -> Self {
        Self {
            path,
            status: EditStatus::Excluded,
            applied_rules: BTreeSet::new(),
        }
    }

    pub fn output(&self) -> Option<&PathBuf> {
        match &self.status {
            EditStatus::Modified { output } => Some(output),
            _ => None,
        }
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            EditStatus::Excluded => {
                write!(f, "Skipping excluded SVG file {}", self.path.display())
            }
            EditStatus::Unchanged => {
                write!(f, "No modifications were made in {}", self.path.display())
            }
            EditStatus::Modified { output } => {
                write!(f, "Modified SVG file saved as {}", output.display())
            }
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub edited: usize,
    pub errors: usize,
    pub excluded: usize,
    pub unchanged: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &EditOutcome) {
        match outcome.status {
            EditStatus::Excluded => self.excluded += 1,
            EditStatus::Unchanged => self.unchanged += 1,
            EditStatus::Modified { .. } => self.edited += 1,
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edited {} files with {} errors",
            self.edited, self.errors
        )
    }
}
