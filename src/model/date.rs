// src/model/date.rs
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Value shape of a `date` property, stored as JSON text inside the string
/// property slot. The encoding must stay bit-compatible with stored data:
/// absent fields are omitted so `{"from":..,"to":..}` round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateProperty {
    pub fn from_timestamp(from: i64) -> Self {
        Self {
            from: Some(from),
            ..Default::default()
        }
    }

    /// Parse the raw string slot of a date property. A bare numeric string is
    /// legacy shorthand for `{from: n}`. Malformed input degrades to the
    /// empty value, never an error.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Number(n)) => {
                let from = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64));
                Self {
                    from,
                    ..Default::default()
                }
            }
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(raw, %err, "could not parse date property value");
                Self::default()
            }),
            Err(err) => {
                warn!(raw, %err, "could not parse date property value");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The defined bounds, flattened in `from`, `to` order.
    pub fn timestamps(&self) -> Vec<i64> {
        [self.from, self.to].into_iter().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}
