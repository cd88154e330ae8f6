// src/calc/number.rs
//! Numeric semantics shared by the aggregation functions. Property values are
//! stored as strings, so parsing follows the permissive legacy rules: the
//! longest valid numeric prefix is taken and anything unparseable becomes NaN,
//! which then propagates through the aggregate instead of being hidden.

/// Parse the longest numeric prefix of a string, NaN when there is none.
/// Accepts an optional sign, decimal point, exponent and `Infinity`.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'+') => {
            i += 1;
            false
        }
        Some(b'-') => {
            i += 1;
            true
        }
        _ => false,
    };

    if s[i..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent counts only when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exponent_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_start {
            i = j;
        }
    }

    s[..i].parse().unwrap_or(f64::NAN)
}

/// Round to two decimal places, half away from zero. Negative zero (the sum
/// of an empty value list, or anything rounding down to it) collapses to
/// plain zero so it never displays as `-0`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Display form of an aggregate: two decimals at most, trailing zeros
/// dropped, NaN rendered as `NaN`, infinities as `Infinity`.
pub fn format_number(value: f64) -> String {
    let rounded = round2(value);
    if rounded == f64::INFINITY {
        "Infinity".to_string()
    } else if rounded == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", rounded)
    }
}
