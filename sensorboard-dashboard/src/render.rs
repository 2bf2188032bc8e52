// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Presentation of a [`PageState`] as HTML or plain text.

use crate::dashboard::{PageState, SensorSlot, SlotState};
use sensorboard::SensorSummary;

/// Placeholder for a sensor whose summary has not arrived.
pub const LOADING: &str = "Loading...";

/// Value with one decimal place and the sensor's unit suffix.
pub fn format_value(value: f64, unit: Option<&str>) -> String {
    format!("{:.1}{}", value, unit.unwrap_or(""))
}

/// The three display lines for a summary.
fn summary_lines(summary: &SensorSummary, unit: Option<&str>) -> [(&'static str, String); 3] {
    [
        ("Current", format_value(summary.current_value, unit)),
        ("Average", format_value(summary.average, unit)),
        ("Status", summary.status().to_string()),
    ]
}

/// Render for a terminal.
pub fn render_text(page: &PageState) -> String {
    if let Some(error) = &page.error {
        return format!("Error: {}\n", error);
    }

    let mut lines = vec![
        page.title.clone(),
        "=".repeat(page.title.chars().count()),
    ];

    for slot in &page.sensors {
        lines.push(String::new());
        lines.push(slot.label.clone());
        match &slot.state {
            SlotState::Loading => lines.push(format!("  {}", LOADING)),
            SlotState::Ready { summary } => lines.extend(
                summary_lines(summary, slot.unit.as_deref())
                    .into_iter()
                    .map(|(name, value)| format!("  {}: {}", name, value)),
            ),
            SlotState::Failed { message } => lines.push(format!("  Error: {}", message)),
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Render the full HTML page.
pub fn render_html(page: &PageState) -> String {
    let body = match &page.error {
        Some(error) => format!("<div class=\"error\">Error: {}</div>", escape(error)),
        None => {
            let cards: String = page.sensors.iter().map(render_card).collect();
            format!(
                "<h1>{}</h1>\n<div class=\"sensors\">\n{}</div>",
                escape(&page.title),
                cards
            )
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }}
        h1 {{ text-align: center; }}
        .sensors {{ display: flex; justify-content: space-around; }}
        .sensor {{ margin: 10px 0; }}
        strong {{ color: #0070f3; }}
        .error {{ color: #c0392b; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(&page.title),
        body = body,
    )
}

fn render_card(slot: &SensorSlot) -> String {
    let content = match &slot.state {
        SlotState::Loading => format!("    <p>{}</p>\n", LOADING),
        SlotState::Ready { summary } => {
            let unit = slot.unit.as_deref().map(escape);
            let [current, average, status] = summary_lines(summary, unit.as_deref());
            format!(
                "    <p>{}: <strong>{}</strong></p>\n    <p>{}: <strong>{}</strong></p>\n    <p>{}: {}</p>\n",
                current.0, current.1, average.0, average.1, status.0, status.1
            )
        }
        SlotState::Failed { message } => {
            format!("    <p class=\"error\">Error: {}</p>\n", escape(message))
        }
    };

    format!(
        "  <div class=\"sensor\" id=\"{}\">\n    <h2>{}</h2>\n{}  </div>\n",
        escape(&slot.name),
        escape(&slot.label),
        content
    )
}

/// Minimal HTML escaping for text and attribute content.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
