//! Raw health-data records.
//!
//! The upstream export has no fixed schema: a record is an arbitrary JSON
//! object whose fields vary by tag and export vintage. Records are kept as
//! passthrough maps and read defensively through accessor methods with
//! fallback chains, mirroring how the upstream serializes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timeparse::parse_timestamp;

/// One raw health-data entry from the export, as an opaque attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Raw type identifier, falling back through the alternate tag fields
    /// the upstream emits for non-quantity elements.
    pub fn record_type(&self) -> Option<&str> {
        self.str_field("type")
            .or_else(|| self.str_field("_type"))
            .or_else(|| self.str_field("_tag"))
    }

    /// The record's value as a finite number, whether encoded as a JSON
    /// number or a numeric string. Anything else is `None`.
    pub fn numeric_value(&self) -> Option<f64> {
        match self.0.get("value")? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Best-usable timestamp: start date, else creation date, else end date.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        ["startDate", "creationDate", "endDate"]
            .iter()
            .find_map(|key| self.str_field(key).and_then(parse_timestamp))
    }

    pub fn unit(&self) -> Option<&str> {
        self.str_field("unit")
    }

    pub fn source(&self) -> Option<&str> {
        self.str_field("sourceName")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
