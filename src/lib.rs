//! # SensorBoard
//!
//! Current-value and rolling-average summaries for ThingSpeak sensor feeds.
//!
//! ## Quick Start
//!
//! ```rust
//! use sensorboard::{summarize, AverageStatus, FeedRecord, FieldSelector, RawFeedPayload};
//!
//! let field = FieldSelector::numbered(1);
//! let payload = RawFeedPayload::new(vec![
//!     FeedRecord::with_field(&field, "10"),
//!     FeedRecord::with_field(&field, "0"),
//!     FeedRecord::with_field(&field, "30"),
//! ]);
//!
//! let summary = summarize(&payload, &field).unwrap();
//! assert_eq!(summary.current_value, 30.0);
//! assert_eq!(summary.average, 20.0);
//! assert_eq!(summary.status(), AverageStatus::Above);
//! ```
//!
//! ## Modules
//!
//! - [`feed`]: Feed payload model and numeric coercion of raw values
//! - [`summary`]: Window reduction to current value and average
//! - [`status`]: Above/below/equal comparison
//! - [`error`]: Failure taxonomy

// Modules
pub mod error;
pub mod feed;
pub mod status;
pub mod summary;

// Re-exports for convenient access
pub use error::{Result, SummaryError, TransportError};
pub use feed::{candidate_value, FeedRecord, FieldSelector, RawFeedPayload, DEFAULT_RESULTS};
pub use status::AverageStatus;
pub use summary::{is_valid_reading, summarize, summarize_json, SensorSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
