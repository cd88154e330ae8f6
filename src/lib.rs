pub mod calc;
pub mod error;
pub mod filter;
pub mod model;

pub use calc::{calculate, Calculation, Locale};
pub use error::{BoardError, Result};
pub use filter::{
    apply_filter_group, is_clause_met, is_filter_group_met, properties_that_meet_filter_group,
    property_that_meets_filter_clause, DefaultProperty, FilterClause, FilterCondition, FilterGroup,
    FilterNode, FilterOperation,
};
pub use model::{
    Card, CardFields, DateProperty, PropertyOption, PropertyTemplate, PropertyType, PropertyValue,
    TITLE_PROPERTY_ID,
};
