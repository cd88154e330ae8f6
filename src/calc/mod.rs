//! The calculation engine: a fixed registry of pure aggregation functions
//! reducing a card list and a property template to one display string, used
//! for column and group footers.

mod aggregate;
mod format;
mod number;

pub use format::Locale;
pub use number::{format_number, parse_float, round2};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::model::{Card, PropertyTemplate, PropertyType};

/// Every calculation the registry knows. The set is closed and immutable;
/// dispatch is a match, not a mutable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Calculation {
    Count,
    CountEmpty,
    CountNotEmpty,
    PercentEmpty,
    PercentNotEmpty,
    CountValue,
    CountUniqueValue,
    CountChecked,
    CountUnchecked,
    PercentChecked,
    PercentUnchecked,
    Sum,
    Average,
    Median,
    Min,
    Max,
    Range,
    Earliest,
    Latest,
    DateRange,
}

impl Calculation {
    pub const ALL: [Calculation; 20] = [
        Calculation::Count,
        Calculation::CountEmpty,
        Calculation::CountNotEmpty,
        Calculation::PercentEmpty,
        Calculation::PercentNotEmpty,
        Calculation::CountValue,
        Calculation::CountUniqueValue,
        Calculation::CountChecked,
        Calculation::CountUnchecked,
        Calculation::PercentChecked,
        Calculation::PercentUnchecked,
        Calculation::Sum,
        Calculation::Average,
        Calculation::Median,
        Calculation::Min,
        Calculation::Max,
        Calculation::Range,
        Calculation::Earliest,
        Calculation::Latest,
        Calculation::DateRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Calculation::Count => "count",
            Calculation::CountEmpty => "countEmpty",
            Calculation::CountNotEmpty => "countNotEmpty",
            Calculation::PercentEmpty => "percentEmpty",
            Calculation::PercentNotEmpty => "percentNotEmpty",
            Calculation::CountValue => "countValue",
            Calculation::CountUniqueValue => "countUniqueValue",
            Calculation::CountChecked => "countChecked",
            Calculation::CountUnchecked => "countUnchecked",
            Calculation::PercentChecked => "percentChecked",
            Calculation::PercentUnchecked => "percentUnchecked",
            Calculation::Sum => "sum",
            Calculation::Average => "average",
            Calculation::Median => "median",
            Calculation::Min => "min",
            Calculation::Max => "max",
            Calculation::Range => "range",
            Calculation::Earliest => "earliest",
            Calculation::Latest => "latest",
            Calculation::DateRange => "dateRange",
        }
    }

    /// Menu label, e.g. "Count Unique Values".
    pub fn label(&self) -> &'static str {
        match self {
            Calculation::Count => "Count",
            Calculation::CountEmpty => "Count Empty",
            Calculation::CountNotEmpty => "Count Not Empty",
            Calculation::PercentEmpty => "Percent Empty",
            Calculation::PercentNotEmpty => "Percent Not Empty",
            Calculation::CountValue => "Count Value",
            Calculation::CountUniqueValue => "Count Unique Values",
            Calculation::CountChecked => "Count Checked",
            Calculation::CountUnchecked => "Count Unchecked",
            Calculation::PercentChecked => "Percent Checked",
            Calculation::PercentUnchecked => "Percent Unchecked",
            Calculation::Sum => "Sum",
            Calculation::Average => "Average",
            Calculation::Median => "Median",
            Calculation::Min => "Min",
            Calculation::Max => "Max",
            Calculation::Range => "Range",
            Calculation::Earliest => "Earliest Date",
            Calculation::Latest => "Latest Date",
            Calculation::DateRange => "Date Range",
        }
    }

    /// Short name shown next to the computed value in a footer cell.
    pub fn display_name(&self) -> &'static str {
        match self {
            Calculation::Count => "Count",
            Calculation::CountEmpty | Calculation::PercentEmpty => "Empty",
            Calculation::CountNotEmpty | Calculation::PercentNotEmpty => "Not Empty",
            Calculation::CountValue => "Values",
            Calculation::CountUniqueValue => "Unique",
            Calculation::CountChecked | Calculation::PercentChecked => "Checked",
            Calculation::CountUnchecked | Calculation::PercentUnchecked => "Unchecked",
            Calculation::Sum => "Sum",
            Calculation::Average => "Average",
            Calculation::Median => "Median",
            Calculation::Min => "Min",
            Calculation::Max => "Max",
            Calculation::Range | Calculation::DateRange => "Range",
            Calculation::Earliest => "Earliest",
            Calculation::Latest => "Latest",
        }
    }

    /// The calculations offered for a property type: the common counting set
    /// everywhere, plus the checkbox, numeric or date family where they
    /// apply.
    pub fn options_for(property_type: PropertyType) -> Vec<Calculation> {
        let mut options = vec![
            Calculation::Count,
            Calculation::CountEmpty,
            Calculation::CountNotEmpty,
            Calculation::PercentEmpty,
            Calculation::PercentNotEmpty,
            Calculation::CountValue,
            Calculation::CountUniqueValue,
        ];
        match property_type {
            PropertyType::Checkbox => options.extend([
                Calculation::CountChecked,
                Calculation::CountUnchecked,
                Calculation::PercentChecked,
                Calculation::PercentUnchecked,
            ]),
            PropertyType::Number => options.extend([
                Calculation::Sum,
                Calculation::Average,
                Calculation::Median,
                Calculation::Min,
                Calculation::Max,
                Calculation::Range,
            ]),
            PropertyType::Date | PropertyType::CreatedTime | PropertyType::UpdatedTime => options
                .extend([
                    Calculation::Earliest,
                    Calculation::Latest,
                    Calculation::DateRange,
                ]),
            _ => {}
        }
        options
    }

    /// Run the calculation. Infallible: malformed values surface in the
    /// result string (`NaN`, empty), never as an error.
    pub fn apply(&self, cards: &[Card], property: &PropertyTemplate, locale: &Locale) -> String {
        match self {
            Calculation::Count => aggregate::count(cards),
            Calculation::CountEmpty => aggregate::count_empty(cards, property),
            Calculation::CountNotEmpty => aggregate::count_not_empty(cards, property),
            Calculation::PercentEmpty => aggregate::percent_empty(cards, property),
            Calculation::PercentNotEmpty => aggregate::percent_not_empty(cards, property),
            Calculation::CountValue => aggregate::count_value(cards, property),
            Calculation::CountUniqueValue => aggregate::count_unique_value(cards, property),
            Calculation::CountChecked => aggregate::count_checked(cards, property),
            Calculation::CountUnchecked => aggregate::count_unchecked(cards, property),
            Calculation::PercentChecked => aggregate::percent_checked(cards, property),
            Calculation::PercentUnchecked => aggregate::percent_unchecked(cards, property),
            Calculation::Sum => aggregate::sum(cards, property),
            Calculation::Average => aggregate::average(cards, property),
            Calculation::Median => aggregate::median(cards, property),
            Calculation::Min => aggregate::min(cards, property),
            Calculation::Max => aggregate::max(cards, property),
            Calculation::Range => aggregate::range(cards, property),
            Calculation::Earliest => aggregate::earliest(cards, property, locale),
            Calculation::Latest => aggregate::latest(cards, property, locale),
            Calculation::DateRange => aggregate::date_range(cards, property, locale),
        }
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Calculation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Calculation::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown calculation: {}", s))
    }
}

/// String-keyed entry point. An unknown name is a programmer error and the
/// only failure this engine can report.
pub fn calculate(
    name: &str,
    cards: &[Card],
    property: &PropertyTemplate,
    locale: &Locale,
) -> Result<String> {
    let calculation: Calculation = name
        .parse()
        .map_err(|_| BoardError::UnknownCalculation(name.to_string()))?;
    Ok(calculation.apply(cards, property, locale))
}
