// src/filter/engine.rs
//! Evaluation of filter trees against cards, plus the reverse mapping used to
//! pre-populate cards created from within a filtered view.

use std::collections::HashMap;

use tracing::warn;

use crate::model::{Card, PropertyTemplate, PropertyType, PropertyValue, TITLE_PROPERTY_ID};

use super::{FilterClause, FilterCondition, FilterGroup, FilterNode, FilterOperation};

/// Evaluate one clause against a card.
///
/// A clause referencing a property id with no template on the board is a
/// diagnostic, not an error: the raw property slot is still consulted and
/// evaluation proceeds.
pub fn is_clause_met(clause: &FilterClause, templates: &[PropertyTemplate], card: &Card) -> bool {
    let value = if clause.property_id == TITLE_PROPERTY_ID {
        PropertyValue::Scalar(card.title.clone())
    } else {
        match templates.iter().find(|t| t.id == clause.property_id) {
            Some(template) => card.property_value(template),
            None => {
                warn!(property_id = %clause.property_id, "filter clause references an unknown property");
                card.raw_property(&clause.property_id)
            }
        }
    };

    match clause.condition {
        FilterCondition::IsEmpty => value.is_empty(),
        FilterCondition::IsNotEmpty => !value.is_empty(),
        // An unconfigured clause (no selected values) excludes nothing.
        FilterCondition::Includes => {
            clause.values.is_empty() || value.items().iter().any(|v| clause.values.contains(v))
        }
        FilterCondition::NotIncludes => {
            clause.values.is_empty() || !value.items().iter().any(|v| clause.values.contains(v))
        }
    }
}

/// Evaluate a filter tree against a card. An empty filter list is vacuously
/// satisfied regardless of the operation.
pub fn is_filter_group_met(group: &FilterGroup, templates: &[PropertyTemplate], card: &Card) -> bool {
    if group.filters.is_empty() {
        return true;
    }
    match group.operation {
        FilterOperation::Or => group
            .filters
            .iter()
            .any(|node| is_node_met(node, templates, card)),
        FilterOperation::And => group
            .filters
            .iter()
            .all(|node| is_node_met(node, templates, card)),
    }
}

fn is_node_met(node: &FilterNode, templates: &[PropertyTemplate], card: &Card) -> bool {
    match node {
        FilterNode::Group(group) => is_filter_group_met(group, templates, card),
        FilterNode::Clause(clause) => is_clause_met(clause, templates, card),
    }
}

/// Narrow a card list to the cards the filter admits. Order-preserving and
/// stable; filtering an already-filtered list is a no-op.
pub fn apply_filter_group(
    group: &FilterGroup,
    templates: &[PropertyTemplate],
    cards: &[Card],
) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| is_filter_group_met(group, templates, card))
        .cloned()
        .collect()
}

/// A property value derived from a clause, for quick-add flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultProperty {
    pub id: String,
    pub value: Option<String>,
}

/// Derive a property value that would satisfy the clause. Only `includes`
/// with selected values produces one; for select-typed properties the first
/// board option wins over the clause's own values.
pub fn property_that_meets_filter_clause(
    clause: &FilterClause,
    templates: &[PropertyTemplate],
) -> DefaultProperty {
    let Some(template) = templates.iter().find(|t| t.id == clause.property_id) else {
        warn!(property_id = %clause.property_id, "cannot find template for filter clause");
        return DefaultProperty {
            id: clause.property_id.clone(),
            value: None,
        };
    };

    let value = match clause.condition {
        FilterCondition::Includes if !clause.values.is_empty() => {
            if template.property_type == PropertyType::Select {
                template.options.first().map(|option| option.id.clone())
            } else {
                Some(clause.values[0].clone())
            }
        }
        _ => None,
    };

    DefaultProperty {
        id: clause.property_id.clone(),
        value,
    }
}

/// Derive property values for every top-level clause of a group. Nested
/// sub-groups are not expanded.
pub fn properties_that_meet_filter_group(
    group: Option<&FilterGroup>,
    templates: &[PropertyTemplate],
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    let Some(group) = group else {
        return result;
    };
    for clause in group.clauses() {
        let property = property_that_meets_filter_clause(clause, templates);
        if let Some(value) = property.value {
            result.insert(property.id, value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyOption;

    fn status_card() -> Card {
        let mut card = Card::new("1", "card1");
        card.set_property("propertyId", "Status");
        card
    }

    fn clause(condition: FilterCondition, values: &[&str]) -> FilterClause {
        FilterClause::new(
            "propertyId",
            condition,
            values.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_is_not_empty_met() {
        assert!(is_clause_met(
            &clause(FilterCondition::IsNotEmpty, &["Status"]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_is_empty_not_met() {
        assert!(!is_clause_met(
            &clause(FilterCondition::IsEmpty, &["Status"]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_is_empty_complements_is_not_empty() {
        let empty_card = Card::new("2", "card2");
        for card in [status_card(), empty_card] {
            let empty = is_clause_met(&clause(FilterCondition::IsEmpty, &[]), &[], &card);
            let not_empty = is_clause_met(&clause(FilterCondition::IsNotEmpty, &[]), &[], &card);
            assert_ne!(empty, not_empty);
        }
    }

    #[test]
    fn test_includes_met() {
        assert!(is_clause_met(
            &clause(FilterCondition::Includes, &["Status"]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_includes_with_no_values_is_vacuously_true() {
        assert!(is_clause_met(
            &clause(FilterCondition::Includes, &[]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_not_includes_not_met() {
        assert!(!is_clause_met(
            &clause(FilterCondition::NotIncludes, &["Status"]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_not_includes_with_no_values_is_vacuously_true() {
        assert!(is_clause_met(
            &clause(FilterCondition::NotIncludes, &[]),
            &[],
            &status_card()
        ));
    }

    #[test]
    fn test_title_pseudo_property() {
        let title_clause = FilterClause::new(
            TITLE_PROPERTY_ID,
            FilterCondition::Includes,
            vec!["card1".to_string()],
        );
        assert!(is_clause_met(&title_clause, &[], &status_card()));
    }

    #[test]
    fn test_multi_value_intersection() {
        let mut card = Card::new("3", "card3");
        card.set_property("tags", vec!["option_id_2", "option_id_3"]);
        let template = PropertyTemplate::new("tags", PropertyType::MultiSelect);

        let hit = FilterClause::new(
            "tags",
            FilterCondition::Includes,
            vec!["option_id_1".to_string(), "option_id_3".to_string()],
        );
        let miss = FilterClause::new(
            "tags",
            FilterCondition::Includes,
            vec!["option_id_9".to_string()],
        );
        let templates = [template];
        assert!(is_clause_met(&hit, &templates, &card));
        assert!(!is_clause_met(&miss, &templates, &card));
    }

    #[test]
    fn test_empty_group_is_met_for_both_operations() {
        let card = status_card();
        for operation in [FilterOperation::And, FilterOperation::Or] {
            let group = FilterGroup::new(operation, vec![]);
            assert!(is_filter_group_met(&group, &[], &card));
        }
    }

    #[test]
    fn test_or_group_needs_one_true_branch() {
        let group = FilterGroup::new(
            FilterOperation::Or,
            vec![
                clause(FilterCondition::NotIncludes, &["Status"]).into(),
                clause(FilterCondition::IsNotEmpty, &["Status"]).into(),
            ],
        );
        assert!(is_filter_group_met(&group, &[], &status_card()));
    }

    #[test]
    fn test_or_group_with_all_false_branches() {
        let group = FilterGroup::new(
            FilterOperation::Or,
            vec![
                clause(FilterCondition::NotIncludes, &["Status"]).into(),
                clause(FilterCondition::IsEmpty, &["Status"]).into(),
            ],
        );
        assert!(!is_filter_group_met(&group, &[], &status_card()));
    }

    #[test]
    fn test_and_group_needs_all_branches_true() {
        let failing = FilterGroup::new(
            FilterOperation::And,
            vec![
                clause(FilterCondition::NotIncludes, &["Status"]).into(),
                clause(FilterCondition::IsNotEmpty, &["Status"]).into(),
            ],
        );
        assert!(!is_filter_group_met(&failing, &[], &status_card()));

        let passing = FilterGroup::new(
            FilterOperation::And,
            vec![
                clause(FilterCondition::Includes, &["Status"]).into(),
                clause(FilterCondition::IsNotEmpty, &["Status"]).into(),
            ],
        );
        assert!(is_filter_group_met(&passing, &[], &status_card()));
    }

    #[test]
    fn test_nested_group_evaluation() {
        let inner = FilterGroup::new(
            FilterOperation::Or,
            vec![
                clause(FilterCondition::NotIncludes, &["Status"]).into(),
                clause(FilterCondition::Includes, &["Status"]).into(),
            ],
        );
        let outer = FilterGroup::new(FilterOperation::Or, vec![inner.into()]);
        assert!(is_filter_group_met(&outer, &[], &status_card()));
    }

    #[test]
    fn test_quick_add_missing_template() {
        let derived =
            property_that_meets_filter_clause(&clause(FilterCondition::Includes, &["a"]), &[]);
        assert_eq!(derived.id, "propertyId");
        assert_eq!(derived.value, None);
    }

    #[test]
    fn test_quick_add_select_uses_first_board_option() {
        let template = PropertyTemplate::new("propertyId", PropertyType::Select).with_options(vec![
            PropertyOption {
                id: "option_id_1".to_string(),
                value: "Option 1".to_string(),
                color: "propColorYellow".to_string(),
            },
            PropertyOption {
                id: "option_id_2".to_string(),
                value: "Option 2".to_string(),
                color: "propColorBlue".to_string(),
            },
        ]);
        let derived = property_that_meets_filter_clause(
            &clause(FilterCondition::Includes, &["option_id_2"]),
            &[template],
        );
        assert_eq!(derived.value.as_deref(), Some("option_id_1"));
    }

    #[test]
    fn test_quick_add_select_with_no_options() {
        let template = PropertyTemplate::new("propertyId", PropertyType::Select);
        let derived = property_that_meets_filter_clause(
            &clause(FilterCondition::Includes, &["option_id_1"]),
            &[template],
        );
        assert_eq!(derived.value, None);
    }

    #[test]
    fn test_quick_add_non_select_uses_first_clause_value() {
        let template = PropertyTemplate::new("propertyId", PropertyType::Text);
        let derived = property_that_meets_filter_clause(
            &clause(FilterCondition::Includes, &["hello", "world"]),
            &[template],
        );
        assert_eq!(derived.value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_quick_add_negative_conditions_produce_nothing() {
        let template = PropertyTemplate::new("propertyId", PropertyType::Text);
        let templates = [template];
        for condition in [
            FilterCondition::IsEmpty,
            FilterCondition::NotIncludes,
            FilterCondition::IsNotEmpty,
        ] {
            let derived =
                property_that_meets_filter_clause(&clause(condition, &["a"]), &templates);
            assert_eq!(derived.value, None);
        }
        let derived = property_that_meets_filter_clause(
            &clause(FilterCondition::Includes, &[]),
            &templates,
        );
        assert_eq!(derived.value, None);
    }

    #[test]
    fn test_quick_add_group_walks_top_level_clauses_only() {
        let text = PropertyTemplate::new("p_text", PropertyType::Text);
        let other = PropertyTemplate::new("p_other", PropertyType::Text);
        let nested_only = PropertyTemplate::new("p_nested", PropertyType::Text);
        let templates = [text, other, nested_only];

        let nested = FilterGroup::new(
            FilterOperation::And,
            vec![FilterClause::new(
                "p_nested",
                FilterCondition::Includes,
                vec!["nested".to_string()],
            )
            .into()],
        );
        let group = FilterGroup::new(
            FilterOperation::And,
            vec![
                FilterClause::new("p_text", FilterCondition::Includes, vec!["v1".to_string()])
                    .into(),
                FilterClause::new("p_other", FilterCondition::IsEmpty, vec![]).into(),
                nested.into(),
            ],
        );

        let result = properties_that_meet_filter_group(Some(&group), &templates);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("p_text").map(String::as_str), Some("v1"));

        assert!(properties_that_meet_filter_group(None, &templates).is_empty());
    }
}
