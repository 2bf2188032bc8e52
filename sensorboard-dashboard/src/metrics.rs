// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Prometheus metrics for the dashboard.
//!
//! Updated once per sensor when the page loads and exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_gauge, register_gauge_vec, CounterVec, Encoder, Gauge, GaugeVec,
    TextEncoder,
};
use sensorboard::{SensorSummary, SummaryError, TransportError};
use std::time::Duration;
use tracing::error;

lazy_static! {
    // ============================================================
    // Fetch outcomes
    // ============================================================

    /// Feed fetches by sensor and outcome.
    pub static ref FETCH_TOTAL: CounterVec = register_counter_vec!(
        "sensorboard_fetch_total",
        "Feed fetches by sensor and outcome",
        &["sensor", "outcome"]
    ).unwrap();

    /// Wall time of the last full page load.
    pub static ref LOAD_DURATION_SECONDS: Gauge = register_gauge!(
        "sensorboard_load_duration_seconds",
        "Duration of the last dashboard load in seconds"
    ).unwrap();

    // ============================================================
    // Summaries
    // ============================================================

    /// Most recent valid reading per sensor.
    pub static ref CURRENT_VALUE: GaugeVec = register_gauge_vec!(
        "sensorboard_current_value",
        "Most recent valid reading",
        &["sensor"]
    ).unwrap();

    /// Window average per sensor.
    pub static ref AVERAGE_VALUE: GaugeVec = register_gauge_vec!(
        "sensorboard_average_value",
        "Average of valid readings in the window",
        &["sensor"]
    ).unwrap();

    /// Readings that passed validation per sensor.
    pub static ref VALID_READINGS: GaugeVec = register_gauge_vec!(
        "sensorboard_valid_readings",
        "Valid readings in the window",
        &["sensor"]
    ).unwrap();
}

/// Label value for a fetch result.
pub fn outcome_label(result: &Result<SensorSummary, SummaryError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(SummaryError::NoDataAvailable) => "no_data",
        Err(SummaryError::NoValidReadings) => "no_valid_readings",
        Err(SummaryError::Transport(TransportError::Status { .. })) => "http_error",
        Err(SummaryError::Transport(TransportError::Network { .. })) => "network_error",
        Err(SummaryError::Transport(TransportError::Body { .. })) => "bad_body",
    }
}

/// Record one sensor's fetch and, on success, its summary.
pub fn record_fetch(sensor: &str, result: &Result<SensorSummary, SummaryError>) {
    FETCH_TOTAL
        .with_label_values(&[sensor, outcome_label(result)])
        .inc();

    if let Ok(summary) = result {
        CURRENT_VALUE
            .with_label_values(&[sensor])
            .set(summary.current_value);
        AVERAGE_VALUE.with_label_values(&[sensor]).set(summary.average);
        VALID_READINGS
            .with_label_values(&[sensor])
            .set(summary.valid_readings as f64);
    }
}

pub fn record_load_duration(elapsed: Duration) {
    LOAD_DURATION_SECONDS.set(elapsed.as_secs_f64());
}

/// Encode all metrics to Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
