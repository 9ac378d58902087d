//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for stratlab.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzerError {
    #[error("insufficient data: have {available} bars, need {required}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("i/o error: {reason}")]
    Io { reason: String },
}

impl AnalyzerError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn data_source(reason: impl Into<String>) -> Self {
        AnalyzerError::DataSource {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io { .. } => 1,
            AnalyzerError::ConfigParse { .. }
            | AnalyzerError::ConfigMissing { .. }
            | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::DataSource { .. } => 3,
            AnalyzerError::InvalidInput { .. } | AnalyzerError::InvalidDateRange { .. } => 4,
            AnalyzerError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
