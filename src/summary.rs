//! Sensor summary computation
//!
//! Reduces one field of a feed window to its latest valid reading and the
//! mean of all valid readings. A reading is valid iff it is finite and
//! strictly greater than zero; zero and negative values are treated as
//! sensor dropouts and never reach the summary.

use crate::error::{Result, SummaryError};
use crate::feed::{candidate_value, FieldSelector, RawFeedPayload};
use crate::status::AverageStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reduced view of one sensor field over a feed window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    /// Most recent valid reading (chronological, not the maximum)
    pub current_value: f64,
    /// Arithmetic mean of every valid reading in the window
    pub average: f64,
    /// Number of readings that passed validation
    pub valid_readings: usize,
}

impl SensorSummary {
    /// Where the current value sits relative to the window average
    pub fn status(&self) -> AverageStatus {
        AverageStatus::compare(self.current_value, self.average)
    }
}

/// True when `value` counts as a real reading
#[inline]
pub fn is_valid_reading(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Summarize `field` over a feed payload.
///
/// # Errors
///
/// - [`SummaryError::NoDataAvailable`] if the payload has no `feeds`
///   container or it is empty
/// - [`SummaryError::NoValidReadings`] if every candidate is filtered out
pub fn summarize(payload: &RawFeedPayload, field: &FieldSelector) -> Result<SensorSummary> {
    let feeds = match payload.feeds.as_deref() {
        Some(feeds) if !feeds.is_empty() => feeds,
        _ => return Err(fail(field, SummaryError::NoDataAvailable)),
    };

    reduce(feeds.iter().map(|record| record.candidate(field)))
        .ok_or_else(|| fail(field, SummaryError::NoValidReadings))
}

/// Summarize `field` over an arbitrary JSON document.
///
/// `null`, non-objects, and documents whose `feeds` is missing or not an
/// array all count as having no data. Array entries that are not objects
/// contribute a non-numeric candidate.
pub fn summarize_json(document: &Value, field: &FieldSelector) -> Result<SensorSummary> {
    let feeds = match document.get("feeds").and_then(Value::as_array) {
        Some(feeds) if !feeds.is_empty() => feeds,
        _ => return Err(fail(field, SummaryError::NoDataAvailable)),
    };

    reduce(
        feeds
            .iter()
            .map(|record| candidate_value(record.get(field.as_str()))),
    )
    .ok_or_else(|| fail(field, SummaryError::NoValidReadings))
}

/// Single pass over the candidates; `None` when nothing is valid.
fn reduce(candidates: impl Iterator<Item = f64>) -> Option<SensorSummary> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut last = None;

    for value in candidates.filter(|v| is_valid_reading(*v)) {
        sum += value;
        count += 1;
        last = Some(value);
    }

    last.map(|current_value| SensorSummary {
        current_value,
        average: sum / count as f64,
        valid_readings: count,
    })
}

#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
fn fail(field: &FieldSelector, err: SummaryError) -> SummaryError {
    #[cfg(feature = "logging")]
    log::warn!("{}: {}", field, err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedRecord;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn payload(values: &[&str]) -> RawFeedPayload {
        let field = FieldSelector::numbered(1);
        RawFeedPayload::new(
            values
                .iter()
                .map(|v| FeedRecord::with_field(&field, *v))
                .collect(),
        )
    }

    #[test]
    fn test_basic_window() {
        let summary = summarize(&payload(&["10", "20", "30"]), &FieldSelector::numbered(1)).unwrap();
        assert_relative_eq!(summary.current_value, 30.0);
        assert_relative_eq!(summary.average, 20.0);
        assert_eq!(summary.valid_readings, 3);
    }

    #[test]
    fn test_negative_filtered() {
        let summary = summarize(&payload(&["5", "-1", "15"]), &FieldSelector::numbered(1)).unwrap();
        assert_relative_eq!(summary.current_value, 15.0);
        assert_relative_eq!(summary.average, 10.0);
        assert_eq!(summary.valid_readings, 2);
    }

    #[test]
    fn test_zero_filtered() {
        let summary = summarize(&payload(&["10", "0", "30"]), &FieldSelector::numbered(1)).unwrap();
        assert_relative_eq!(summary.current_value, 30.0);
        assert_relative_eq!(summary.average, 20.0);
    }

    #[test]
    fn test_current_is_last_valid_not_max() {
        let summary = summarize(&payload(&["40", "12", "abc", "-3"]), &FieldSelector::numbered(1)).unwrap();
        assert_relative_eq!(summary.current_value, 12.0);
        assert_relative_eq!(summary.average, 26.0);
    }

    #[test]
    fn test_empty_and_missing() {
        let field = FieldSelector::numbered(1);
        assert_eq!(
            summarize(&RawFeedPayload::missing(), &field),
            Err(SummaryError::NoDataAvailable)
        );
        assert_eq!(
            summarize(&RawFeedPayload::new(Vec::new()), &field),
            Err(SummaryError::NoDataAvailable)
        );
    }

    #[test]
    fn test_no_valid_readings() {
        assert_eq!(
            summarize(&payload(&["0", "-4", "", "n/a"]), &FieldSelector::numbered(1)),
            Err(SummaryError::NoValidReadings)
        );
    }

    #[test]
    fn test_other_field_ignored() {
        // Records only carry field1, so field2 has nothing valid
        assert_eq!(
            summarize(&payload(&["10", "20"]), &FieldSelector::numbered(2)),
            Err(SummaryError::NoValidReadings)
        );
    }

    #[test]
    fn test_infinite_rejected() {
        assert!(!is_valid_reading(f64::INFINITY));
        assert!(!is_valid_reading(f64::NAN));
        assert!(!is_valid_reading(0.0));
        assert!(!is_valid_reading(-0.5));
        assert!(is_valid_reading(0.001));

        let summary = summarize(&payload(&["inf", "8"]), &FieldSelector::numbered(1)).unwrap();
        assert_relative_eq!(summary.current_value, 8.0);
        assert_eq!(summary.valid_readings, 1);
    }

    #[test]
    fn test_summarize_json_shapes() {
        let field = FieldSelector::numbered(1);
        assert_eq!(summarize_json(&Value::Null, &field), Err(SummaryError::NoDataAvailable));
        assert_eq!(summarize_json(&json!([]), &field), Err(SummaryError::NoDataAvailable));
        assert_eq!(summarize_json(&json!({}), &field), Err(SummaryError::NoDataAvailable));
        assert_eq!(
            summarize_json(&json!({ "feeds": "oops" }), &field),
            Err(SummaryError::NoDataAvailable)
        );
        assert_eq!(
            summarize_json(&json!({ "feeds": [] }), &field),
            Err(SummaryError::NoDataAvailable)
        );

        let doc = json!({ "feeds": [ { "field1": 4 }, 7, { "field1": "6" } ] });
        let summary = summarize_json(&doc, &field).unwrap();
        assert_relative_eq!(summary.current_value, 6.0);
        assert_relative_eq!(summary.average, 5.0);
        assert_eq!(summary.valid_readings, 2);
    }

    #[test]
    fn test_status_from_summary() {
        let summary = summarize(&payload(&["10", "20", "30"]), &FieldSelector::numbered(1)).unwrap();
        assert_eq!(summary.status(), AverageStatus::Above);

        let summary = summarize(&payload(&["5", "5"]), &FieldSelector::numbered(1)).unwrap();
        assert_eq!(summary.status(), AverageStatus::Equal);
    }
}
