// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Dashboard configuration.
//!
//! Every section has defaults matching the public ThingSpeak channel the
//! dashboard was built for, so an empty JSON object is a valid config file.

use crate::error::{DashboardError, Result};
use sensorboard::{FieldSelector, DEFAULT_RESULTS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// ThingSpeak caps `results` at this many records
pub const MAX_RESULTS: u32 = 8000;

/// Master configuration for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page heading.
    pub title: String,

    /// Where feeds come from.
    pub feed: FeedConfig,

    /// Sensors shown on the page, fetched in this order.
    pub sensors: Vec<SensorConfig>,

    /// How per-sensor failures fold into the page.
    pub failure_policy: FailurePolicy,

    /// HTTP server settings.
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Sensor Data Dashboard".to_string(),
            feed: FeedConfig::default(),
            sensors: vec![SensorConfig::temperature(), SensorConfig::light()],
            failure_policy: FailurePolicy::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a config from a JSON file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the loader relies on
    pub fn validate(&self) -> Result<()> {
        if self.sensors.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "at least one sensor is required".to_string(),
            ));
        }

        if self.feed.results == 0 || self.feed.results > MAX_RESULTS {
            return Err(DashboardError::InvalidConfig(format!(
                "results must be between 1 and {}, got {}",
                MAX_RESULTS, self.feed.results
            )));
        }

        if self.feed.timeout_secs == 0 {
            return Err(DashboardError::InvalidConfig(
                "timeout_secs must be positive".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            if !seen.insert(sensor.name.as_str()) {
                return Err(DashboardError::InvalidConfig(format!(
                    "duplicate sensor name: {}",
                    sensor.name
                )));
            }
        }

        Ok(())
    }
}

/// Feed source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// API root, without trailing slash.
    pub base_url: String,

    /// ThingSpeak channel id.
    pub channel_id: u64,

    /// Most-recent records requested per sensor.
    pub results: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.thingspeak.com".to_string(),
            channel_id: 2804070,
            results: DEFAULT_RESULTS,
            timeout_secs: 10,
        }
    }
}

/// One sensor on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Stable key used in metrics and `/status`.
    pub name: String,

    /// Heading shown on the page.
    pub label: String,

    /// Feed field holding the readings.
    pub field: FieldSelector,

    /// Suffix appended to rendered values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl SensorConfig {
    /// Temperature on `field1`, rendered in degrees
    pub fn temperature() -> Self {
        Self {
            name: "temperature".to_string(),
            label: "Temperature".to_string(),
            field: FieldSelector::numbered(1),
            unit: Some("°".to_string()),
        }
    }

    /// Light level on `field2`, unitless
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            label: "Light".to_string(),
            field: FieldSelector::numbered(2),
            unit: None,
        }
    }
}

/// How sibling sensor failures affect each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failed sensor replaces the whole page with one error.
    #[default]
    AllOrNothing,
    /// Each sensor shows its own summary or its own error.
    PerSensor,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}
