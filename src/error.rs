//! Error types.
//!
//! - `LoadError` is the only failure the dashboard logic can produce: a dataset
//!   file that is missing, unreadable, or holds a value we refuse to guess about.
//! - `AppError` is the binary-level error: a message plus the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for input/dataset problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for terminal/runtime problems.
pub const EXIT_RUNTIME: u8 = 4;

/// Failure while reading `day.csv` / `hour.csv`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' is missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("'{}' line {line}, column `{column}`: {reason}", .path.display())]
    InvalidField {
        path: PathBuf,
        line: usize,
        column: &'static str,
        reason: String,
    },
}

impl LoadError {
    /// The file the failure belongs to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::MissingColumn { path, .. }
            | LoadError::InvalidField { path, .. } => path,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(
            EXIT_INPUT,
            format!(
                "Failed to load the data. Please check that day.csv and hour.csv are in the data directory.\n{err}"
            ),
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
