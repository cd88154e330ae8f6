mod card;
mod date;

pub use card::{Card, CardFields, PropertyValue};
pub use date::DateProperty;

use serde::{Deserialize, Serialize};

/// Synthetic property id for the card title column. Boards do not store a
/// template for the title; filters referencing this id read `card.title`.
pub const TITLE_PROPERTY_ID: &str = "__title";

/// The closed set of property types definable on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    #[default]
    Text,
    Number,
    Email,
    Phone,
    Url,
    Select,
    MultiSelect,
    Person,
    Date,
    Checkbox,
    CreatedTime,
    CreatedBy,
    UpdatedTime,
    UpdatedBy,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Text => "text",
            PropertyType::Number => "number",
            PropertyType::Email => "email",
            PropertyType::Phone => "phone",
            PropertyType::Url => "url",
            PropertyType::Select => "select",
            PropertyType::MultiSelect => "multiSelect",
            PropertyType::Person => "person",
            PropertyType::Date => "date",
            PropertyType::Checkbox => "checkbox",
            PropertyType::CreatedTime => "createdTime",
            PropertyType::CreatedBy => "createdBy",
            PropertyType::UpdatedTime => "updatedTime",
            PropertyType::UpdatedBy => "updatedBy",
        }
    }

    /// Types whose value is a timestamp carrying a time-of-day component.
    pub fn is_time_bearing(&self) -> bool {
        matches!(self, PropertyType::CreatedTime | PropertyType::UpdatedTime)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(PropertyType::Text),
            "number" => Ok(PropertyType::Number),
            "email" => Ok(PropertyType::Email),
            "phone" => Ok(PropertyType::Phone),
            "url" => Ok(PropertyType::Url),
            "select" => Ok(PropertyType::Select),
            "multiselect" | "multi_select" => Ok(PropertyType::MultiSelect),
            "person" => Ok(PropertyType::Person),
            "date" => Ok(PropertyType::Date),
            "checkbox" => Ok(PropertyType::Checkbox),
            "createdtime" | "created_time" => Ok(PropertyType::CreatedTime),
            "createdby" | "created_by" => Ok(PropertyType::CreatedBy),
            "updatedtime" | "updated_time" => Ok(PropertyType::UpdatedTime),
            "updatedby" | "updated_by" => Ok(PropertyType::UpdatedBy),
            _ => Err(format!("Unknown property type: {}", s)),
        }
    }
}

/// One choice of a select / multiSelect property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub color: String,
}

/// Describes one column/property definable on a board. `id` is unique among
/// a board's templates; `options` is only meaningful for select/multiSelect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub options: Vec<PropertyOption>,
}

impl PropertyTemplate {
    pub fn new(id: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            property_type,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<PropertyOption>) -> Self {
        self.options = options;
        self
    }

    pub fn find_option(&self, option_id: &str) -> Option<&PropertyOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
