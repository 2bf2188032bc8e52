// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! One-shot dashboard load.
//!
//! Sensors are fetched one after another, each summarized independently,
//! then folded into a [`PageState`] according to the configured
//! [`FailurePolicy`]. The page state is an immutable value: renderers and
//! HTTP handlers only ever read it.

use crate::client::FeedSource;
use crate::config::{DashboardConfig, FailurePolicy, SensorConfig};
use crate::metrics::{record_fetch, record_load_duration};
use chrono::{DateTime, Utc};
use sensorboard::{summarize, SensorSummary, SummaryError};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn, Level};

/// Page-level message shown when the all-or-nothing policy trips.
pub const PAGE_ERROR_MESSAGE: &str = "Error fetching sensor data";

/// Display state of one sensor slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    Loading,
    Ready { summary: SensorSummary },
    Failed { message: String },
}

/// One sensor as the page shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSlot {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub state: SlotState,
}

impl SensorSlot {
    fn new(sensor: &SensorConfig, state: SlotState) -> Self {
        Self {
            name: sensor.name.clone(),
            label: sensor.label.clone(),
            unit: sensor.unit.clone(),
            state,
        }
    }

    pub fn summary(&self) -> Option<&SensorSummary> {
        match &self.state {
            SlotState::Ready { summary } => Some(summary),
            _ => None,
        }
    }
}

/// Everything the presentation layer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    pub title: String,
    pub sensors: Vec<SensorSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl PageState {
    /// Initial state: every sensor waiting for data.
    pub fn loading(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            sensors: config
                .sensors
                .iter()
                .map(|s| SensorSlot::new(s, SlotState::Loading))
                .collect(),
            error: None,
            loaded_at: None,
        }
    }

    /// Fold per-sensor results into a page.
    ///
    /// `results` must be in the same order as `config.sensors`.
    pub fn from_results(
        config: &DashboardConfig,
        results: Vec<Result<SensorSummary, SummaryError>>,
    ) -> Self {
        let mut page = Self::loading(config);
        page.loaded_at = Some(Utc::now());

        match config.failure_policy {
            FailurePolicy::AllOrNothing => {
                if results.iter().any(Result::is_err) {
                    // Successful siblings are discarded on purpose
                    page.error = Some(PAGE_ERROR_MESSAGE.to_string());
                    return page;
                }
                for (slot, result) in page.sensors.iter_mut().zip(results) {
                    if let Ok(summary) = result {
                        slot.state = SlotState::Ready { summary };
                    }
                }
            }
            FailurePolicy::PerSensor => {
                for (slot, result) in page.sensors.iter_mut().zip(results) {
                    slot.state = match result {
                        Ok(summary) => SlotState::Ready { summary },
                        Err(e) => SlotState::Failed {
                            message: e.message(),
                        },
                    };
                }
            }
        }

        page
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn slot(&self, name: &str) -> Option<&SensorSlot> {
        self.sensors.iter().find(|s| s.name == name)
    }
}

/// Fetch and summarize a single sensor.
pub async fn load_sensor<S>(source: &S, sensor: &SensorConfig) -> Result<SensorSummary, SummaryError>
where
    S: FeedSource + ?Sized,
{
    let payload = source.fetch(&sensor.field).await?;
    summarize(&payload, &sensor.field)
}

/// Log level for a failed sensor load.
///
/// Empty or unusable feeds are already warned about by `summarize`; only
/// transport failures are reported at `WARN` here.
fn failure_level(err: &SummaryError) -> Level {
    match err {
        SummaryError::Transport(_) => Level::WARN,
        SummaryError::NoDataAvailable | SummaryError::NoValidReadings => Level::DEBUG,
    }
}

/// Run the one-shot load for every configured sensor, sequentially.
pub async fn load<S>(source: &S, config: &DashboardConfig) -> PageState
where
    S: FeedSource + ?Sized,
{
    let start = Instant::now();
    let mut results = Vec::with_capacity(config.sensors.len());

    for sensor in &config.sensors {
        let result = load_sensor(source, sensor).await;
        match &result {
            Ok(summary) => info!(
                "{}: current {:.1}, average {:.1} over {} readings",
                sensor.name, summary.current_value, summary.average, summary.valid_readings
            ),
            Err(e) if failure_level(e) == Level::WARN => warn!("{}: {}", sensor.name, e),
            Err(e) => debug!("{}: {}", sensor.name, e),
        }
        record_fetch(&sensor.name, &result);
        results.push(result);
    }

    record_load_duration(start.elapsed());
    PageState::from_results(config, results)
}
