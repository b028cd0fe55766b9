//! Centralized match event logger
//!
//! The in-memory buffer doubles as the match's append-only event log:
//! every entry is buffered regardless of verbosity, because snapshot
//! consumers (UI, tests) read the log as match history. Verbosity only
//! gates what is echoed to stdout.

use serde::{Deserialize, Serialize};

/// Verbosity levels for stdout output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - only the match outcome
    Minimal = 1,
    /// Normal - turns and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions and state changes
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Capture only to the in-memory buffer (default; library use)
    #[default]
    Memory,
    /// Buffer and echo to stdout
    Both,
}

/// A single buffered log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Append-only match logger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    entries: Vec<LogEntry>,
}

impl GameLogger {
    pub fn new() -> Self {
        GameLogger {
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            entries: Vec::new(),
        }
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::new()
        }
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Log a normal-priority game event
    pub fn log(&mut self, message: impl Into<String>) {
        self.log_at(VerbosityLevel::Normal, message);
    }

    /// Log a minimal-priority event (shown even at low verbosity)
    pub fn log_minimal(&mut self, message: impl Into<String>) {
        self.log_at(VerbosityLevel::Minimal, message);
    }

    /// Log a verbose event (per-point damage breakdowns and the like)
    pub fn log_verbose(&mut self, message: impl Into<String>) {
        self.log_at(VerbosityLevel::Verbose, message);
    }

    pub fn log_at(&mut self, level: VerbosityLevel, message: impl Into<String>) {
        let message = message.into();
        if self.output_mode == OutputMode::Both && level <= self.verbosity {
            println!("{}", message);
        }
        self.entries.push(LogEntry { level, message });
    }

    /// All buffered entries, in append order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Event log as plain strings (the snapshot representation)
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
