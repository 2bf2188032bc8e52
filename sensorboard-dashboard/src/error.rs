// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Error types for the dashboard

use thiserror::Error;

/// Main error type for dashboard setup and serving.
///
/// Per-sensor fetch failures are not represented here: they end up in the
/// page state as [`sensorboard::SummaryError`] messages.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::config::DashboardConfig`]
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config parsed but is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Listener bind or serve failure
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
