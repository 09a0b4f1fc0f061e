//! Domain error types.

use chrono::NaiveDate;

/// Why a period record (or a ratio derived from it) was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidReason {
    #[error("{field} is negative ({value})")]
    NegativeField { field: &'static str, value: f64 },

    #[error("{field} is not a finite number")]
    NonFiniteField { field: &'static str },

    #[error("{field} must be positive to be used as a denominator (got {value})")]
    NonPositiveDenominator { field: &'static str, value: f64 },

    #[error("{metric} is undefined")]
    UndefinedRatio { metric: &'static str },

    #[error("missing required field {field}")]
    MissingField { field: &'static str },

    #[error("date is not after the previous period ({previous})")]
    UnorderedDates { previous: NaiveDate },
}

/// Top-level error type for regtrack.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("invalid input{}: {reason}", format_date(.date))]
    InvalidInput {
        date: Option<NaiveDate>,
        reason: InvalidReason,
    },

    #[error("{stage} requires at least one period")]
    EmptyInput { stage: &'static str },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn invalid(date: NaiveDate, reason: InvalidReason) -> Self {
        TrackerError::InvalidInput {
            date: Some(date),
            reason,
        }
    }
}

fn format_date(date: &Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(" for period {d}"),
        None => String::new(),
    }
}

impl From<&TrackerError> for std::process::ExitCode {
    fn from(err: &TrackerError) -> Self {
        let code: u8 = match err {
            TrackerError::Io(_) | TrackerError::Report { .. } => 1,
            TrackerError::ConfigParse { .. }
            | TrackerError::ConfigMissing { .. }
            | TrackerError::ConfigInvalid { .. } => 2,
            TrackerError::Data { .. } => 3,
            TrackerError::InvalidInput { .. } => 4,
            TrackerError::EmptyInput { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
