//! Error types for SensorBoard
//!
//! Every way a sensor summary can fail to materialize. None of these are
//! fatal: callers turn them into a display message with
//! [`SummaryError::message`].

use thiserror::Error;

/// Result type alias for summary operations
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Why no summary could be produced for a sensor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// Payload was absent, had no `feeds` container, or the container was empty
    #[error("No data available")]
    NoDataAvailable,

    /// Every reading in the window was zero, negative or non-numeric
    #[error("No valid readings found")]
    NoValidReadings,

    /// The feed could not be retrieved
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SummaryError {
    /// Human-readable message for display
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors while retrieving a feed over HTTP
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Request never completed (DNS, connect, timeout)
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// Response body was not a feed document
    #[error("Invalid response body: {reason}")]
    Body { reason: String },
}
