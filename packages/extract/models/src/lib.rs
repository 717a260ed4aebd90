#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data types shared by the mineral resource table extractor and its CLI.
//!
//! A [`Record`] is one element of a chunked report (usually a JSON array
//! of objects with a `text` field). Extraction classifies table columns
//! into [`ColumnRole`]s and produces one [`ResultEntry`] per matching
//! table row, each slot holding a [`MetricValue`].

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Semantic role of a table column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColumnRole {
    /// Column holding the ore/metal label used to match rows
    OreType,
    /// Measured tonnage (Mt)
    MeasuredTonnage,
    /// Measured grade as a percentage of the metal
    MeasuredGradePercent,
    /// Measured grade in parts per million
    MeasuredPpm,
    /// Measured grade in grams per tonne
    MeasuredGpt,
    /// Indicated tonnage (Mt)
    IndicatedTonnage,
    /// Indicated grade as a percentage of the metal
    IndicatedGradePercent,
    /// Indicated grade in parts per million
    IndicatedPpm,
}

impl ColumnRole {
    /// Every role, in header classification order.
    pub const ALL: &[Self] = &[
        Self::OreType,
        Self::MeasuredTonnage,
        Self::MeasuredGradePercent,
        Self::MeasuredPpm,
        Self::MeasuredGpt,
        Self::IndicatedTonnage,
        Self::IndicatedGradePercent,
        Self::IndicatedPpm,
    ];

    /// Roles feeding [`ResultEntry::resources`], in slot order.
    pub const RESOURCES: [Self; 4] = [
        Self::MeasuredTonnage,
        Self::MeasuredGradePercent,
        Self::MeasuredPpm,
        Self::MeasuredGpt,
    ];

    /// Roles feeding [`ResultEntry::reserves`], in slot order.
    pub const RESERVES: [Self; 3] = [
        Self::IndicatedTonnage,
        Self::IndicatedGradePercent,
        Self::IndicatedPpm,
    ];
}

/// A normalized table cell.
///
/// Serializes as a JSON number, a JSON string, or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// The cell parsed as a number (thousands separators removed).
    Number(f64),
    /// The cell was present but not numeric (e.g. `"NA"`), kept verbatim.
    Text(String),
    /// The cell was empty, a `-` placeholder, or the column is unknown.
    #[default]
    Absent,
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing `.0` on whole numbers
            Self::Number(n) => write!(f, "{n:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Absent => f.write_str("-"),
        }
    }
}

/// Figures extracted from one matching table row.
///
/// The slot layout is fixed: `resources` is always
/// `[measured Mt, measured %, measured ppm, measured g/t]` and `reserves`
/// is always `[indicated Mt, indicated %, indicated ppm]`, regardless of
/// which columns the table actually has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Measured resource figures.
    pub resources: [MetricValue; 4],
    /// Indicated figures.
    pub reserves: [MetricValue; 3],
}

/// One element of the input document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Free text, possibly containing a pipe-delimited table.
    #[serde(default)]
    pub text: Option<String>,
}

impl Record {
    /// Creates a record holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Builds a record from an arbitrary JSON value.
    ///
    /// Anything that is not an object with a string `text` field becomes a
    /// record without text.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            text: value
                .get("text")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
        }
    }

    /// Returns the record text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn metric_value_serializes_untagged() {
        let entry = ResultEntry {
            resources: [
                MetricValue::Number(1000.0),
                MetricValue::Text("NA".to_owned()),
                MetricValue::Absent,
                MetricValue::Absent,
            ],
            reserves: [
                MetricValue::Number(500.0),
                MetricValue::Absent,
                MetricValue::Absent,
            ],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "resources": [1000.0, "NA", null, null],
                "reserves": [500.0, null, null],
            })
        );
    }

    #[test]
    fn metric_value_display() {
        assert_eq!(MetricValue::Number(1000.0).to_string(), "1000.0");
        assert_eq!(MetricValue::Number(1.5).to_string(), "1.5");
        assert_eq!(MetricValue::Text("NA".to_owned()).to_string(), "\"NA\"");
        assert_eq!(MetricValue::Absent.to_string(), "-");
    }

    #[test]
    fn column_role_round_trips_through_strum() {
        for role in ColumnRole::ALL {
            assert_eq!(ColumnRole::from_str(role.as_ref()).unwrap(), *role);
        }
        assert_eq!(ColumnRole::MeasuredGpt.to_string(), "measured_gpt");
    }

    #[test]
    fn record_from_value_tolerates_odd_shapes() {
        let with_text = serde_json::json!({"text": "Olympic Dam", "page": 3});
        assert_eq!(Record::from_value(&with_text).text(), Some("Olympic Dam"));

        let numeric_text = serde_json::json!({"text": 42});
        assert!(Record::from_value(&numeric_text).text().is_none());

        let not_object = serde_json::json!("Olympic Dam");
        assert!(Record::from_value(&not_object).text().is_none());
    }
}
