use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Units were written to `output`
    Written {
        source: PathBuf,
        output: PathBuf,
        units: usize,
    },
    /// The file segmented to zero units; nothing was written
    Empty { source: PathBuf },
    /// Reading, parsing or writing failed
    Failed { source: PathBuf, error: String },
}

impl FileOutcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Written { source, .. } | Self::Empty { source } | Self::Failed { source, .. } => {
                source
            }
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Written { output, .. } => write!(f, "[OK] {}", output.display()),
            Self::Empty { source } => write!(f, "[EMPTY] {}", source.display()),
            Self::Failed { source, .. } => write!(f, "[FAIL] {}", source.display()),
        }
    }
}

/// Statistics about a directory run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of files segmented (attempted)
    pub files: usize,

    /// Output files written
    pub written: usize,

    /// Files with no units
    pub empty: usize,

    /// Total units across written files
    pub units: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Failed source files with their error messages
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files += 1;
        match outcome {
            FileOutcome::Written { units, .. } => {
                self.written += 1;
                self.units += units;
            }
            FileOutcome::Empty { .. } => self.empty += 1,
            FileOutcome::Failed { source, error } => {
                self.failures.push((source.clone(), error.clone()));
            }
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Files: {} | Written: {} | Empty: {} | Failed: {} | Units: {} | {} ms",
            self.files,
            self.written,
            self.empty,
            self.failed(),
            self.units,
            self.time_ms
        )
    }
}
