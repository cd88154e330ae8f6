// src/filter/group.rs
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::FilterClause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    #[default]
    And,
    Or,
}

impl std::fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOperation::And => write!(f, "and"),
            FilterOperation::Or => write!(f, "or"),
        }
    }
}

impl std::str::FromStr for FilterOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(FilterOperation::And),
            "or" => Ok(FilterOperation::Or),
            _ => Err(format!("Unknown filter operation: {}", s)),
        }
    }
}

/// A node of the filter tree: either a leaf clause or a nested group. The
/// kind is an explicit tag in memory; on the wire the legacy form is
/// shape-discriminated (an object with both `operation` and `filters` keys is
/// a group, anything else is a clause), so deserialization reconstructs a
/// tree of unknown depth without ever coercing one kind into the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterNode {
    Clause(FilterClause),
    Group(FilterGroup),
}

impl FilterNode {
    pub fn is_group(&self) -> bool {
        matches!(self, FilterNode::Group(_))
    }

    pub fn as_clause(&self) -> Option<&FilterClause> {
        match self {
            FilterNode::Clause(clause) => Some(clause),
            FilterNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            FilterNode::Group(group) => Some(group),
            FilterNode::Clause(_) => None,
        }
    }
}

impl From<FilterClause> for FilterNode {
    fn from(clause: FilterClause) -> Self {
        FilterNode::Clause(clause)
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(group: FilterGroup) -> Self {
        FilterNode::Group(group)
    }
}

impl<'de> Deserialize<'de> for FilterNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        // Legacy shape check: both keys must be present for a group.
        if value.get("operation").is_some() && value.get("filters").is_some() {
            serde_json::from_value(value)
                .map(FilterNode::Group)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(FilterNode::Clause)
                .map_err(D::Error::custom)
        }
    }
}

/// A boolean combination of clauses and nested groups. An empty group is
/// vacuously satisfied for both operations ("no filter means unfiltered").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterGroup {
    pub operation: FilterOperation,
    pub filters: Vec<FilterNode>,
}

impl FilterGroup {
    pub fn new(operation: FilterOperation, filters: Vec<FilterNode>) -> Self {
        Self { operation, filters }
    }

    /// The top-level clauses of this group, skipping nested groups.
    pub fn clauses(&self) -> impl Iterator<Item = &FilterClause> {
        self.filters.iter().filter_map(FilterNode::as_clause)
    }
}
