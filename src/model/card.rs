// src/model/card.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{PropertyTemplate, PropertyType, TITLE_PROPERTY_ID};

/// A single card property slot. Absent keys, empty strings and empty arrays
/// are all "no value"; `is_empty` is the one shared predicate for that, used
/// by the filter engine and the calculation engine alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PropertyValue {
    #[default]
    Empty,
    Scalar(String),
    Multi(Vec<String>),
}

impl PropertyValue {
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Empty => true,
            PropertyValue::Scalar(s) => s.is_empty(),
            PropertyValue::Multi(v) => v.is_empty(),
        }
    }

    /// Set view of the value: a non-empty scalar is a singleton, an empty
    /// value contributes nothing.
    pub fn items(&self) -> &[String] {
        match self {
            PropertyValue::Empty => &[],
            PropertyValue::Scalar(s) if s.is_empty() => &[],
            PropertyValue::Scalar(s) => std::slice::from_ref(s),
            PropertyValue::Multi(v) => v,
        }
    }

    /// The scalar text of the value, or `""` when empty. Multi values yield
    /// their first element.
    pub fn text(&self) -> &str {
        self.items().first().map(String::as_str).unwrap_or("")
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Scalar(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Multi(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::Multi(values.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CardFields {
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A content entity on a board. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub fields: CardFields,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: 0,
            updated_at: 0,
            created_by: String::new(),
            updated_by: String::new(),
            fields: CardFields::default(),
        }
    }

    pub fn set_property(&mut self, property_id: impl Into<String>, value: impl Into<PropertyValue>) {
        self.fields
            .properties
            .insert(property_id.into(), value.into());
    }

    /// Value of the property slot as stored, `Empty` when the key is absent.
    pub fn raw_property(&self, property_id: &str) -> PropertyValue {
        self.fields
            .properties
            .get(property_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Extract the value a template describes. The title pseudo-property and
    /// the created/updated metadata types read card metadata instead of the
    /// property bag. createdTime/updatedTime are truncated to whole minutes
    /// so cards touched within the same minute share one value (this feeds
    /// unique-value counting).
    pub fn property_value(&self, template: &PropertyTemplate) -> PropertyValue {
        if template.id == TITLE_PROPERTY_ID {
            return PropertyValue::Scalar(self.title.clone());
        }
        match template.property_type {
            PropertyType::CreatedBy => PropertyValue::Scalar(self.created_by.clone()),
            PropertyType::UpdatedBy => PropertyValue::Scalar(self.updated_by.clone()),
            PropertyType::CreatedTime => {
                PropertyValue::Scalar(minute_truncated(self.created_at).to_string())
            }
            PropertyType::UpdatedTime => {
                PropertyValue::Scalar(minute_truncated(self.updated_at).to_string())
            }
            _ => self.raw_property(&template.id),
        }
    }
}

fn minute_truncated(timestamp: i64) -> i64 {
    timestamp - timestamp % 60_000
}
