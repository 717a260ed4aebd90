//! Table cell normalization.
//!
//! Report tables mix plain numbers, thousands-separated numbers, `-`
//! placeholders for empty cells, and free-text markers such as `NA`.

use mineral_table_extract_models::MetricValue;

/// Cell content that stands for "no value".
pub const PLACEHOLDER: &str = "-";

/// Thousands separator stripped before numeric parsing.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Converts a raw cell into a [`MetricValue`].
///
/// `None`, the empty string and [`PLACEHOLDER`] become
/// [`MetricValue::Absent`]. Anything else is trimmed and parsed as `f64`
/// after removing thousands separators. When that fails, or the result is
/// not finite (`NaN`, `inf`), the raw string is returned unchanged as
/// [`MetricValue::Text`].
#[must_use]
pub fn normalize(raw: Option<&str>) -> MetricValue {
    let Some(raw) = raw else {
        return MetricValue::Absent;
    };
    if raw.is_empty() || raw == PLACEHOLDER {
        return MetricValue::Absent;
    }

    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    digits
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map_or_else(|| MetricValue::Text(raw.to_owned()), MetricValue::Number)
}
