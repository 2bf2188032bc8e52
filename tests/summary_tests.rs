// SensorBoard - ThingSpeak sensor summaries
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Integration tests for feed summarization
//!
//! These tests drive `summarize` through JSON documents shaped like real
//! ThingSpeak field responses.

use approx::assert_relative_eq;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sensorboard::{
    summarize, summarize_json, AverageStatus, FeedRecord, FieldSelector, RawFeedPayload,
    SummaryError,
};
use serde_json::json;

/// Build a ThingSpeak-style document with one field
fn feed_document(field: &str, values: &[serde_json::Value]) -> serde_json::Value {
    let feeds: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            json!({
                "created_at": format!("2025-01-10T12:{:02}:00Z", i % 60),
                "entry_id": i + 1,
                field: v,
            })
        })
        .collect();

    json!({
        "channel": { "id": 2804070, "field1": "Temperature", "field2": "Light" },
        "feeds": feeds,
    })
}

fn parse(document: serde_json::Value) -> RawFeedPayload {
    serde_json::from_value(document).unwrap()
}

// ============================================================================
// Reference windows
// ============================================================================

#[test]
fn test_reference_windows() {
    let field = FieldSelector::numbered(1);
    let cases: [(&[&str], f64, f64); 3] = [
        (&["10", "20", "30"], 30.0, 20.0),
        (&["5", "-1", "15"], 15.0, 10.0),
        (&["10", "0", "30"], 30.0, 20.0),
    ];

    for (values, current, average) in cases {
        let values: Vec<_> = values.iter().map(|v| json!(v)).collect();
        let payload = parse(feed_document("field1", &values));
        let summary = summarize(&payload, &field).unwrap();

        assert_relative_eq!(summary.current_value, current);
        assert_relative_eq!(summary.average, average);
    }
}

#[test]
fn test_mixed_value_types() {
    let field = FieldSelector::numbered(2);
    let values = [json!("120"), json!(null), json!(80), json!(""), json!("lux?"), json!(" 100 ")];
    let payload = parse(feed_document("field2", &values));

    let summary = summarize(&payload, &field).unwrap();
    assert_relative_eq!(summary.current_value, 100.0);
    assert_relative_eq!(summary.average, 100.0);
    assert_eq!(summary.valid_readings, 3);
    assert_eq!(summary.status(), AverageStatus::Equal);
}

#[test]
fn test_full_window_of_sixty() {
    let field = FieldSelector::numbered(1);
    let values: Vec<_> = (1..=60).map(|i| json!(i.to_string())).collect();
    let payload = parse(feed_document("field1", &values));

    assert_eq!(payload.len(), 60);
    let summary = summarize(&payload, &field).unwrap();
    assert_relative_eq!(summary.current_value, 60.0);
    assert_relative_eq!(summary.average, 30.5);
    assert_eq!(summary.status(), AverageStatus::Above);
}

// ============================================================================
// Failure cases
// ============================================================================

#[test]
fn test_no_data_available() {
    let field = FieldSelector::numbered(1);

    assert_eq!(
        summarize(&parse(json!({ "channel": { "id": 1 } })), &field),
        Err(SummaryError::NoDataAvailable)
    );
    assert_eq!(
        summarize(&parse(json!({ "feeds": [] })), &field),
        Err(SummaryError::NoDataAvailable)
    );
    assert_eq!(
        summarize_json(&serde_json::Value::Null, &field),
        Err(SummaryError::NoDataAvailable)
    );
}

#[test]
fn test_no_valid_readings() {
    let field = FieldSelector::numbered(1);
    let values = [json!("0"), json!("-2.5"), json!(null), json!("NaN"), json!(-7)];
    let payload = parse(feed_document("field1", &values));

    let err = summarize(&payload, &field).unwrap_err();
    assert_eq!(err, SummaryError::NoValidReadings);
    assert_eq!(err.message(), "No valid readings found");
}

#[test]
fn test_typed_and_json_agree_on_odd_metadata() {
    let field = FieldSelector::numbered(1);
    let document = json!({
        "feeds": [
            { "entry_id": "41", "field1": "10" },
            { "entry_id": 42.0, "created_at": null, "field1": "30" }
        ]
    });

    let typed = summarize(&parse(document.clone()), &field).unwrap();
    let loose = summarize_json(&document, &field).unwrap();

    assert_eq!(typed, loose);
    assert_relative_eq!(typed.current_value, 30.0);
    assert_relative_eq!(typed.average, 20.0);
    assert_eq!(typed.valid_readings, 2);
}

// ============================================================================
// Ordering and purity
// ============================================================================

#[test]
fn test_average_is_order_independent() {
    let field = FieldSelector::numbered(1);
    let mut values: Vec<f64> = (1..=40).map(|i| i as f64 * 1.25).collect();
    let baseline = summarize(&records(&field, &values), &field).unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..10 {
        values.shuffle(&mut rng);
        let shuffled = summarize(&records(&field, &values), &field).unwrap();

        assert_relative_eq!(shuffled.average, baseline.average, epsilon = 1e-9);
        assert_relative_eq!(shuffled.current_value, *values.last().unwrap());
    }
}

#[test]
fn test_current_tracks_last_valid() {
    let field = FieldSelector::numbered(1);
    let payload = records(&field, &[3.0, 9.0, 4.0, 0.0, -1.0]);

    let summary = summarize(&payload, &field).unwrap();
    assert_relative_eq!(summary.current_value, 4.0);
}

#[test]
fn test_idempotent() {
    let field = FieldSelector::numbered(1);
    let payload = records(&field, &[12.0, 0.0, 18.0, 15.0]);
    let before = payload.clone();

    let first = summarize(&payload, &field);
    let second = summarize(&payload, &field);

    assert_eq!(first, second);
    assert_eq!(payload, before);
}

fn records(field: &FieldSelector, values: &[f64]) -> RawFeedPayload {
    RawFeedPayload::new(
        values
            .iter()
            .map(|v| FeedRecord::with_field(field, *v))
            .collect(),
    )
}
