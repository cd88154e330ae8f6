// src/filter/clause.rs
use serde::{Deserialize, Serialize};

/// The conditions a clause can test. `includes`/`notIncludes` are
/// set-membership tests; an unconfigured clause (no values) satisfies both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterCondition {
    #[default]
    Includes,
    NotIncludes,
    IsEmpty,
    IsNotEmpty,
}

impl FilterCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCondition::Includes => "includes",
            FilterCondition::NotIncludes => "notIncludes",
            FilterCondition::IsEmpty => "isEmpty",
            FilterCondition::IsNotEmpty => "isNotEmpty",
        }
    }
}

impl std::fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilterCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "").as_str() {
            "includes" => Ok(FilterCondition::Includes),
            "notincludes" => Ok(FilterCondition::NotIncludes),
            "isempty" => Ok(FilterCondition::IsEmpty),
            "isnotempty" => Ok(FilterCondition::IsNotEmpty),
            _ => Err(format!("Unknown filter condition: {}", s)),
        }
    }
}

/// One leaf of a filter tree: a condition on a single board property.
///
/// Equality is structural and order-sensitive on `values` — `['a','b']` and
/// `['b','a']` are different clauses by contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterClause {
    pub property_id: String,
    pub condition: FilterCondition,
    pub values: Vec<String>,
}

impl FilterClause {
    pub fn new(
        property_id: impl Into<String>,
        condition: FilterCondition,
        values: Vec<String>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            condition,
            values,
        }
    }
}
