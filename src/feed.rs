//! ThingSpeak feed payload model
//!
//! A channel feed document looks like:
//!
//! ```json
//! {
//!   "channel": { "id": 2804070, "name": "..." },
//!   "feeds": [
//!     { "created_at": "2025-01-10T12:00:00Z", "entry_id": 41, "field1": "22.5" },
//!     { "created_at": "2025-01-10T12:01:00Z", "entry_id": 42, "field1": null }
//!   ]
//! }
//! ```
//!
//! Only `feeds` matters here. Records are kept oldest first, exactly as the
//! API returns them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Default number of most-recent records requested per feed
pub const DEFAULT_RESULTS: u32 = 60;

/// A feed document as returned by the channel field endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeedPayload {
    /// Chronological records, `None` when the document has no `feeds` key
    #[serde(default)]
    pub feeds: Option<Vec<FeedRecord>>,
}

impl RawFeedPayload {
    /// Build a payload from records (oldest first)
    pub fn new(feeds: Vec<FeedRecord>) -> Self {
        Self { feeds: Some(feeds) }
    }

    /// Payload without a records container
    pub fn missing() -> Self {
        Self { feeds: None }
    }

    /// Number of records, zero when the container is missing
    pub fn len(&self) -> usize {
        self.feeds.as_ref().map_or(0, Vec::len)
    }

    /// True when there is nothing to summarize
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One time-stamped record of a feed
///
/// Every key is kept as raw JSON, ThingSpeak metadata included, so an odd
/// `entry_id` or `created_at` never rejects the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedRecord {
    /// `created_at`, `entry_id`, `field1`..`field8`, ...
    pub fields: Map<String, Value>,
}

impl FeedRecord {
    /// Record holding a single field value
    pub fn with_field(field: &FieldSelector, value: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert(field.as_str().to_string(), value.into());
        Self { fields }
    }

    /// Raw value stored under `field`, if the key is present
    pub fn value(&self, field: &FieldSelector) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    /// Numeric candidate for `field` (see [`candidate_value`])
    pub fn candidate(&self, field: &FieldSelector) -> f64 {
        candidate_value(self.value(field))
    }

    /// ISO-8601 creation time reported by ThingSpeak
    pub fn created_at(&self) -> Option<&str> {
        self.fields.get("created_at").and_then(Value::as_str)
    }

    /// Entry number within the channel, from a number or numeric string
    pub fn entry_id(&self) -> Option<u64> {
        match self.fields.get("entry_id")? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Names the field to extract from each record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSelector(String);

impl FieldSelector {
    /// Selector for an arbitrary key
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Selector for ThingSpeak's numbered fields: `numbered(1)` is `field1`
    pub fn numbered(n: u8) -> Self {
        Self(format!("field{}", n))
    }

    /// The key as it appears in feed records
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field number when the key is exactly `fieldN`.
    ///
    /// Spellings like `field01` or `field+1` are not numbered fields: the
    /// single-field endpoint would key its records `field1`, not the
    /// selector's own name.
    pub fn number(&self) -> Option<u8> {
        let n: u8 = self.0.strip_prefix("field")?.parse().ok()?;
        (format!("field{}", n) == self.0).then_some(n)
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Convert a raw record value into a numeric candidate.
///
/// ThingSpeak sends readings as strings, numbers or `null`. Blank strings,
/// `null` and `false` become 0; `true` becomes 1; anything that is not a
/// number at all (missing key, arrays, objects, garbage strings) becomes NaN.
/// Validity is decided later by [`crate::summary::is_valid_reading`].
pub fn candidate_value(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}
