// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! ThingSpeak feed retrieval.

use crate::config::FeedConfig;
use crate::error::Result;
use async_trait::async_trait;
use sensorboard::{FieldSelector, RawFeedPayload, TransportError};
use std::time::Duration;
use tracing::debug;

/// Anything that can hand back a feed window for one field.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the most recent records for `field`, oldest first.
    async fn fetch(&self, field: &FieldSelector) -> std::result::Result<RawFeedPayload, TransportError>;
}

/// HTTP client for the ThingSpeak channel API.
pub struct ThingSpeakClient {
    pub base_url: String,
    pub channel_id: u64,
    pub results: u32,
    client: reqwest::Client,
}

impl ThingSpeakClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            channel_id: config.channel_id,
            results: config.results,
            client,
        })
    }

    /// Endpoint for a field.
    ///
    /// Numbered fields use the single-field endpoint; any other key falls
    /// back to the whole-channel feed, which carries every field.
    pub fn feed_url(&self, field: &FieldSelector) -> String {
        match field.number() {
            Some(n) => format!(
                "{}/channels/{}/fields/{}.json?results={}",
                self.base_url, self.channel_id, n, self.results
            ),
            None => format!(
                "{}/channels/{}/feeds.json?results={}",
                self.base_url, self.channel_id, self.results
            ),
        }
    }

    /// Decode a response body. A literal `null` document has no feeds.
    pub fn parse_body(body: &[u8]) -> std::result::Result<RawFeedPayload, TransportError> {
        serde_json::from_slice::<Option<RawFeedPayload>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| TransportError::Body {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl FeedSource for ThingSpeakClient {
    async fn fetch(&self, field: &FieldSelector) -> std::result::Result<RawFeedPayload, TransportError> {
        let url = self.feed_url(field);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network {
                reason: e.to_string(),
            })?;

        Self::parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ThingSpeakClient {
        ThingSpeakClient::new(&FeedConfig {
            base_url: "http://localhost:3000/".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_feed_url() {
        let c = client();
        assert_eq!(
            c.feed_url(&FieldSelector::numbered(1)),
            "http://localhost:3000/channels/2804070/fields/1.json?results=60"
        );
        assert_eq!(
            c.feed_url(&FieldSelector::new("custom")),
            "http://localhost:3000/channels/2804070/feeds.json?results=60"
        );
    }

    #[test]
    fn test_feed_url_non_canonical_field() {
        // Records from fields/1.json are keyed `field1`, never `field01`
        let c = client();
        for name in ["field01", "field+1", "field001"] {
            assert_eq!(
                c.feed_url(&FieldSelector::new(name)),
                "http://localhost:3000/channels/2804070/feeds.json?results=60"
            );
        }
    }

    #[test]
    fn test_parse_body_odd_metadata() {
        let payload = ThingSpeakClient::parse_body(
            br#"{"feeds":[{"entry_id":"41","field1":"10"},{"entry_id":42.0,"created_at":null,"field1":"30"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.len(), 2);

        let summary = sensorboard::summarize(&payload, &FieldSelector::numbered(1)).unwrap();
        assert_eq!(summary.current_value, 30.0);
        assert_eq!(summary.average, 20.0);
    }

    #[test]
    fn test_parse_body() {
        let payload = ThingSpeakClient::parse_body(br#"{"feeds":[{"field1":"3"}]}"#).unwrap();
        assert_eq!(payload.len(), 1);

        let payload = ThingSpeakClient::parse_body(b"null").unwrap();
        assert!(payload.feeds.is_none());

        let err = ThingSpeakClient::parse_body(b"<html>").unwrap_err();
        assert!(matches!(err, TransportError::Body { .. }));
    }
}
