//! Line-oriented output sinks.
//!
//! The engine reports to two sinks: one for informational lines (only used
//! in verbose mode) and one for diagnostics.

use colored::Colorize;
use std::sync::Mutex;

pub trait LogSink {
    fn log(&self, line: &str);
}

/// Informational lines on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn log(&self, line: &str) {
        println!("{}", line);
    }
}

/// Diagnostics on stderr, highlighted in red.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn log(&self, line: &str) {
        eprintln!("{}", line.red());
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    lines: Mutex<Vec<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn clear(&self) {
        match self.lines.lock() {
            Ok(mut lines) => lines.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl LogSink for CaptureSink {
    fn log(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}
