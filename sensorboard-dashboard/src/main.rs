// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # SensorBoard Dashboard
//!
//! ## Usage
//!
//! ```bash
//! # Serve the dashboard for the default channel
//! sensorboard-dashboard
//!
//! # Print one summary to the terminal and exit
//! sensorboard-dashboard --once
//!
//! # Custom channel, isolated sensor errors
//! sensorboard-dashboard --channel 12345 --per-sensor-errors --port 9090
//! ```

use clap::Parser;
use sensorboard_dashboard::server::{self, AppState};
use sensorboard_dashboard::{
    load, render_text, DashboardConfig, FailurePolicy, PageState, Result, ThingSpeakClient,
};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// ThingSpeak sensor dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults apply to anything it omits)
    #[arg(short, long)]
    config: Option<String>,

    /// ThingSpeak API root
    #[arg(long)]
    base_url: Option<String>,

    /// Channel id
    #[arg(long)]
    channel: Option<u64>,

    /// Most-recent records per sensor
    #[arg(short, long)]
    results: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Show each sensor's own error instead of one page-level error
    #[arg(long)]
    per_sensor_errors: bool,

    /// Fetch once, print the dashboard as text, and exit
    #[arg(long)]
    once: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(base_url) = self.base_url {
            config.feed.base_url = base_url;
        }
        if let Some(channel) = self.channel {
            config.feed.channel_id = channel;
        }
        if let Some(results) = self.results {
            config.feed.results = results;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.feed.timeout_secs = timeout_secs;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.per_sensor_errors {
            config.failure_policy = FailurePolicy::PerSensor;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("SensorBoard Dashboard v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let once = args.once;
    let config = args.into_config()?;
    let client = ThingSpeakClient::new(&config.feed)?;

    info!(
        "Channel {} at {}: {} sensors, {} results each",
        config.feed.channel_id,
        config.feed.base_url,
        config.sensors.len(),
        config.feed.results
    );

    if once {
        let page = load(&client, &config).await;
        print!("{}", render_text(&page));
        return Ok(if page.error.is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let state = AppState::new(PageState::loading(&config));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    server::spawn_load(state.clone(), Arc::new(client), Arc::new(config));
    server::serve(listener, state).await?;

    Ok(ExitCode::SUCCESS)
}
