// src/calc/aggregate.rs
//! The aggregation functions behind footer and group summaries. All of them
//! are pure reductions over `(cards, property)`; numeric ones keep the
//! permissive NaN-propagating semantics of the stored string values so bad
//! data shows up as a visibly broken aggregate instead of a silently wrong
//! number.

use std::collections::HashSet;

use crate::model::{Card, DateProperty, PropertyTemplate, PropertyType, PropertyValue};

use super::format::Locale;
use super::number::{format_number, parse_float};

fn non_empty_values<'a>(
    cards: &'a [Card],
    property: &'a PropertyTemplate,
) -> impl Iterator<Item = PropertyValue> + 'a {
    cards
        .iter()
        .map(|card| card.property_value(property))
        .filter(|value| !value.is_empty())
}

/// Numeric view of every non-empty value, parsed leniently.
fn numeric_values(cards: &[Card], property: &PropertyTemplate) -> Vec<f64> {
    non_empty_values(cards, property)
        .map(|value| parse_float(value.text()))
        .collect()
}

pub fn count(cards: &[Card]) -> String {
    cards.len().to_string()
}

pub fn count_empty(cards: &[Card], property: &PropertyTemplate) -> String {
    cards
        .iter()
        .filter(|card| card.property_value(property).is_empty())
        .count()
        .to_string()
}

pub fn count_not_empty(cards: &[Card], property: &PropertyTemplate) -> String {
    non_empty_values(cards, property).count().to_string()
}

pub fn percent_empty(cards: &[Card], property: &PropertyTemplate) -> String {
    percent_of(
        cards,
        cards
            .iter()
            .filter(|card| card.property_value(property).is_empty())
            .count(),
    )
}

pub fn percent_not_empty(cards: &[Card], property: &PropertyTemplate) -> String {
    percent_of(cards, non_empty_values(cards, property).count())
}

fn percent_of(cards: &[Card], n: usize) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let percent = (n as f64 * 100.0 / cards.len() as f64).round();
    format!("{}%", percent)
}

/// Total selected values: multiSelect counts every selected option, all other
/// types count one per non-empty card.
pub fn count_value(cards: &[Card], property: &PropertyTemplate) -> String {
    count_value_raw(cards, property).to_string()
}

fn count_value_raw(cards: &[Card], property: &PropertyTemplate) -> usize {
    non_empty_values(cards, property)
        .map(|value| match (property.property_type, &value) {
            (PropertyType::MultiSelect, PropertyValue::Multi(items)) => items.len(),
            _ => 1,
        })
        .sum()
}

/// Distinct values across non-empty cards. multiSelect unions individual
/// options; scalar types compare by string identity (createdTime/updatedTime
/// arrive minute-bucketed from the shared extractor).
pub fn count_unique_value(cards: &[Card], property: &PropertyTemplate) -> String {
    let mut unique: HashSet<String> = HashSet::new();
    for value in non_empty_values(cards, property) {
        for item in value.items() {
            unique.insert(item.clone());
        }
    }
    unique.len().to_string()
}

pub fn count_checked(cards: &[Card], property: &PropertyTemplate) -> String {
    count_value(cards, property)
}

pub fn count_unchecked(cards: &[Card], property: &PropertyTemplate) -> String {
    cards
        .len()
        .saturating_sub(count_value_raw(cards, property))
        .to_string()
}

pub fn percent_checked(cards: &[Card], property: &PropertyTemplate) -> String {
    percent_of(cards, count_value_raw(cards, property))
}

pub fn percent_unchecked(cards: &[Card], property: &PropertyTemplate) -> String {
    percent_of(cards, cards.len().saturating_sub(count_value_raw(cards, property)))
}

pub fn sum(cards: &[Card], property: &PropertyTemplate) -> String {
    format_number(numeric_values(cards, property).iter().sum())
}

pub fn average(cards: &[Card], property: &PropertyTemplate) -> String {
    let values = numeric_values(cards, property);
    if values.is_empty() {
        return "0".to_string();
    }
    let total: f64 = values.iter().sum();
    format_number(total / values.len() as f64)
}

pub fn median(cards: &[Card], property: &PropertyTemplate) -> String {
    let mut values = numeric_values(cards, property);
    if values.is_empty() {
        return "0".to_string();
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let middle = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[middle - 1] + values[middle]) / 2.0
    } else {
        values[middle]
    };
    format_number(median)
}

pub fn min(cards: &[Card], property: &PropertyTemplate) -> String {
    format_number(fold_extreme(cards, property, f64::INFINITY, f64::min))
}

pub fn max(cards: &[Card], property: &PropertyTemplate) -> String {
    format_number(fold_extreme(cards, property, f64::NEG_INFINITY, f64::max))
}

fn fold_extreme(
    cards: &[Card],
    property: &PropertyTemplate,
    sentinel: f64,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    let mut result = sentinel;
    let mut seen = false;
    for value in numeric_values(cards, property) {
        // f64::min/max would swallow NaN; malformed values must poison the
        // aggregate instead.
        result = if value.is_nan() || result.is_nan() {
            f64::NAN
        } else {
            pick(result, value)
        };
        seen = true;
    }
    if seen {
        result
    } else {
        0.0
    }
}

pub fn range(cards: &[Card], property: &PropertyTemplate) -> String {
    format!("{} - {}", min(cards, property), max(cards, property))
}

/// Every timestamp a card contributes for a date-flavored property: a numeric
/// string is one timestamp, a JSON `{from,to}` contributes its defined bounds.
fn timestamps(card: &Card, property: &PropertyTemplate) -> Vec<i64> {
    let value = card.property_value(property);
    if value.is_empty() {
        return Vec::new();
    }
    DateProperty::parse(value.text()).timestamps()
}

fn earliest_raw(cards: &[Card], property: &PropertyTemplate) -> Option<i64> {
    cards
        .iter()
        .flat_map(|card| timestamps(card, property))
        .min()
}

fn latest_raw(cards: &[Card], property: &PropertyTemplate) -> Option<i64> {
    cards
        .iter()
        .flat_map(|card| timestamps(card, property))
        .max()
}

fn format_timestamp(epoch_ms: i64, property: &PropertyTemplate, locale: &Locale) -> String {
    if property.property_type.is_time_bearing() {
        locale.format_date_time(epoch_ms)
    } else {
        locale.format_date(epoch_ms)
    }
}

pub fn earliest(cards: &[Card], property: &PropertyTemplate, locale: &Locale) -> String {
    match earliest_raw(cards, property) {
        Some(epoch_ms) => format_timestamp(epoch_ms, property, locale),
        None => String::new(),
    }
}

pub fn latest(cards: &[Card], property: &PropertyTemplate, locale: &Locale) -> String {
    match latest_raw(cards, property) {
        Some(epoch_ms) => format_timestamp(epoch_ms, property, locale),
        None => String::new(),
    }
}

pub fn date_range(cards: &[Card], property: &PropertyTemplate, locale: &Locale) -> String {
    match (earliest_raw(cards, property), latest_raw(cards, property)) {
        (Some(from), Some(to)) => locale.format_duration(to - from),
        _ => String::new(),
    }
}
