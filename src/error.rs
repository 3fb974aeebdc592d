use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("Failed to load names from {path:?}: {reason}")]
    SourceLoad { path: PathBuf, reason: String },

    #[error("Failed to write results to {path:?}: {reason}")]
    SinkWrite { path: PathBuf, reason: String },

    #[error("API request error: {0}")]
    ApiRequestError(reqwest::Error),

    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),
}

impl CrateError {
    pub(crate) fn source_load(path: &std::path::Path, reason: impl ToString) -> Self {
        CrateError::SourceLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn sink_write(path: &std::path::Path, reason: impl ToString) -> Self {
        CrateError::SinkWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrateError>;

/// Why a single name could not be resolved. Never fatal for the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Non-JSON response: {0}")]
    Parse(String),

    #[error("No results")]
    EmptyResults,

    #[error("Error contacting service: {0}")]
    Transport(String),
}

impl LookupFailure {
    pub fn category(&self) -> &'static str {
        match self {
            LookupFailure::HttpStatus(_) => "http-error",
            LookupFailure::Parse(_) => "parse-error",
            LookupFailure::EmptyResults => "empty-results",
            LookupFailure::Transport(_) => "transport-exception",
        }
    }
}
