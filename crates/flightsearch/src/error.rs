//! Error types for flightsearch.
//!
//! Filtering never fails. The errors here cover configuration loading, the
//! failure modes of a live flight source, and parsing of user input.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for flightsearch operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Flight Source Errors ===
    /// The flight source could not be reached or answered with garbage.
    #[error("flight source '{source_name}' failed: {message}")]
    NetworkFailure {
        /// Name of the flight source.
        source_name: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// The flight source rejected the requested dates.
    #[error("invalid date range: return {return_date} is before departure {depart}")]
    InvalidDateRange {
        /// Requested departure date.
        depart: NaiveDate,
        /// Requested return date.
        return_date: NaiveDate,
    },

    /// The flight source did not answer in time.
    #[error("search timed out after {elapsed_ms}ms")]
    Timeout {
        /// How long the search ran before giving up.
        elapsed_ms: u64,
    },

    // === Session Errors ===
    /// A search was submitted while another is still in flight.
    #[error("a search is already in progress")]
    SearchPending,

    // === Input Errors ===
    /// A stop filter label was not recognised.
    #[error("unknown stop filter '{0}' (expected direct, 1 or 2+)")]
    UnknownStopBucket(String),

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a network failure error for a flight source.
    #[must_use]
    pub fn network_failure(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            source_name,
            message: message.into(),
        }
    }

    /// Create an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(depart: NaiveDate, return_date: NaiveDate) -> Self {
        Self::InvalidDateRange {
            depart,
            return_date,
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from a flight source.
    #[must_use]
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. } | Self::InvalidDateRange { .. } | Self::Timeout { .. }
        )
    }

    /// Check if retrying the same search might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. } | Self::Timeout { .. })
    }
}
