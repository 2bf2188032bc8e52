// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # SensorBoard Dashboard
//!
//! Fetches temperature and light feeds from a ThingSpeak channel once,
//! summarizes them with [`sensorboard::summarize`], and renders the result
//! as an HTML page (served) or plain text (terminal).
//!
//! ```text
//!  ThingSpeak ──GET field1──▶ ┌──────────┐
//!             ──GET field2──▶ │  load()  │──▶ PageState ──▶ render_html / render_text
//!                             └──────────┘
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod render;
pub mod server;

pub use client::{FeedSource, ThingSpeakClient};
pub use config::{DashboardConfig, FailurePolicy, FeedConfig, SensorConfig, ServerConfig};
pub use dashboard::{load, load_sensor, PageState, SensorSlot, SlotState, PAGE_ERROR_MESSAGE};
pub use error::{DashboardError, Result};
pub use render::{render_html, render_text};
