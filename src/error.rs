//! Error handling for surveillance data operations.
//!
//! Provides the crate-wide error type covering data retrieval, CSV decoding,
//! date handling and configuration failures.

use chrono::NaiveDate;
use thiserror::Error;

use crate::app::services::date_codec::DateParseError;

/// Comprehensive error types for ingestion, filtering and reporting
#[derive(Error, Debug)]
pub enum Error {
    /// The CSV resource could not be retrieved
    #[error("Failed to fetch '{source_name}'{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Fetch {
        source_name: String,
        status: Option<u16>,
        message: String,
    },

    /// The CSV body could not be decoded into rows
    #[error("CSV parsing error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A date string is not in DD.MM.YYYY form
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] DateParseError),

    /// Date range bounds out of order
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Record failed validation
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a fetch error for a non-success response
    pub fn fetch_status(source_name: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            status: Some(status),
            message: "non-success response".to_string(),
        }
    }

    /// Create a fetch error for a transport or file access failure
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create a CSV parse error with optional source
    pub fn parse(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::Parse {
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// HTTP status carried by a fetch failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// True for failures that end the session (fetch and parse)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Parse {
            message: "CSV decoding failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {error}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
