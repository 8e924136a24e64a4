//! The three record shapes and their JSON line encoding.
//!
//! Wire format, one object per line:
//!
//! ```text
//! {"type":"event","title":<string>,"body":<string>,"tags":{...}}
//! {"type":"gauge","name":<string>,"value":<float64>,"tags":{...}}
//! {"type":"counter","name":<string>,"delta":<uint>,"tags":{...}}
//! ```

use core::fmt;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{RecordError, RecordResult};
use crate::tags::Tags;

/// Discriminator written into the `type` field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Event,
    Gauge,
    Counter,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Event => "event",
            RecordKind::Gauge => "gauge",
            RecordKind::Counter => "counter",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metric record, built per call and discarded once encoded.
///
/// Field declaration order is the order fields appear on the wire, after the
/// leading `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// A discrete occurrence with a free-form body.
    Event {
        title: String,
        body: String,
        tags: Tags,
    },
    /// A point-in-time measurement.
    Gauge {
        name: String,
        #[serde(serialize_with = "serialize_finite")]
        value: f64,
        tags: Tags,
    },
    /// A non-negative increment.
    Counter { name: String, delta: u64, tags: Tags },
}

impl Record {
    pub fn event(title: impl Into<String>, body: impl Into<String>, tags: Tags) -> Self {
        Record::Event {
            title: title.into(),
            body: body.into(),
            tags,
        }
    }

    pub fn gauge(name: impl Into<String>, value: f64, tags: Tags) -> Self {
        Record::Gauge {
            name: name.into(),
            value,
            tags,
        }
    }

    pub fn counter(name: impl Into<String>, delta: u64, tags: Tags) -> Self {
        Record::Counter {
            name: name.into(),
            delta,
            tags,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Event { .. } => RecordKind::Event,
            Record::Gauge { .. } => RecordKind::Gauge,
            Record::Counter { .. } => RecordKind::Counter,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Record::Event { tags, .. } | Record::Gauge { tags, .. } | Record::Counter { tags, .. } => {
                tags
            }
        }
    }

    /// Replace the record's tags with `defaults` overlaid by its own tags.
    pub fn with_default_tags(mut self, defaults: &Tags) -> Self {
        let tags = match &mut self {
            Record::Event { tags, .. } | Record::Gauge { tags, .. } | Record::Counter { tags, .. } => {
                tags
            }
        };
        *tags = Tags::merged(defaults, Some(&*tags));
        self
    }

    /// Encode as a compact JSON object (no trailing newline).
    ///
    /// Fails for gauges whose value is NaN or infinite, which have no JSON
    /// number form.
    pub fn to_json(&self) -> RecordResult<String> {
        serde_json::to_string(self).map_err(|e| RecordError::serialization(self.kind(), e))
    }
}

fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("unsupported value: {value}")));
    }
    serializer.serialize_f64(*value)
}
