mod clause;
mod engine;
mod group;

pub use clause::{FilterClause, FilterCondition};
pub use engine::{
    apply_filter_group, is_clause_met, is_filter_group_met, properties_that_meet_filter_group,
    property_that_meets_filter_clause, DefaultProperty,
};
pub use group::{FilterGroup, FilterNode, FilterOperation};
