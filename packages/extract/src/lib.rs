#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mineral resource figure extraction from pipe-delimited report tables.
//!
//! Annual reports chunked into JSON records often carry resource tables as
//! loose markdown text. [`extract`] finds the record for a site, infers
//! which columns hold measured and indicated tonnage and grade for a metal,
//! and returns one [`ResultEntry`] per row labelled with that metal.
//!
//! The pipeline is linear and fails fast:
//!
//! 1. locate the first record containing the anchor ([`ExtractOptions`])
//! 2. parse its text as a [`table::LineTable`]
//! 3. build a [`mapping::ColumnMapping`] with [`rules::HEADER_RULES`]
//! 4. scan rows and [`normalize::normalize`] each mapped cell

pub mod config;
pub mod mapping;
pub mod normalize;
pub mod records;
pub mod rules;
pub mod table;

pub use config::{ExtractConfig, ExtractOptions, RowPolicy};
pub use mineral_table_extract_models::{ColumnRole, MetricValue, Record, ResultEntry};

use mapping::ColumnMapping;
use normalize::normalize;
use rules::HeaderClassifier;
use table::{LineTable, TableRow};

/// Errors that can occur during extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// No record contains the anchor substring.
    #[error("No record contains {anchor:?}")]
    NotFound {
        /// The anchor that was searched for.
        anchor: String,
    },

    /// The target record has too few non-empty lines to hold a table.
    #[error("Malformed table: {lines} non-empty lines, need at least 3")]
    MalformedTable {
        /// Number of non-empty lines found.
        lines: usize,
    },

    /// The table has no row labelled with the metal.
    #[error("No data found for metal {metal:?}")]
    NoData {
        /// The metal symbol that was searched for.
        metal: String,
    },

    /// A matching row's cell count differs from the header's
    /// ([`RowPolicy::Strict`] only).
    #[error("Row on line {line} has {found} cells, header has {expected}")]
    RaggedRow {
        /// 1-based position among the table's non-empty lines.
        line: usize,
        /// Number of header labels.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },

    /// The metal symbol is empty or whitespace.
    #[error("Metal symbol must not be empty")]
    EmptyMetal,

    /// A header unit pattern failed to compile.
    #[error("Invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Extracts figures for `metal` using [`ExtractOptions::default`].
///
/// # Errors
///
/// See [`extract_with`].
pub fn extract(records: &[Record], metal: &str) -> Result<Vec<ResultEntry>, ExtractError> {
    extract_with(records, metal, &ExtractOptions::default())
}

/// Extracts figures for `metal` from the first record containing
/// `options.anchor`.
///
/// Rows match when their ore type cell contains `metal`, ignoring case.
/// Columns the header does not provide, and cells missing from a short
/// row, read as [`MetricValue::Absent`].
///
/// # Errors
///
/// * [`ExtractError::EmptyMetal`] if `metal` is blank
/// * [`ExtractError::NotFound`] if no record contains the anchor
/// * [`ExtractError::MalformedTable`] if the record has fewer than three
///   non-empty lines
/// * [`ExtractError::RaggedRow`] under [`RowPolicy::Strict`]
/// * [`ExtractError::NoData`] if no row matches `metal`
pub fn extract_with(
    records: &[Record],
    metal: &str,
    options: &ExtractOptions,
) -> Result<Vec<ResultEntry>, ExtractError> {
    if metal.trim().is_empty() {
        return Err(ExtractError::EmptyMetal);
    }

    let text = find_target(records, &options.anchor)?;
    let table = LineTable::parse(text)?;
    let classifier = HeaderClassifier::new(metal)?;
    let mapping = ColumnMapping::from_headers(table.headers(), &classifier);

    log::debug!(
        "Mapped {} of {} roles for {metal} from {} headers, unresolved: {:?}",
        mapping.len(),
        ColumnRole::ALL.len(),
        table.headers().len(),
        mapping.unresolved().collect::<Vec<_>>()
    );

    let Some(label_column) = mapping.get(ColumnRole::OreType) else {
        log::debug!("No ore type column in header {:?}", table.headers());
        return Err(ExtractError::NoData {
            metal: metal.to_owned(),
        });
    };

    let needle = metal.to_lowercase();
    let mut entries = Vec::new();

    for row in table.rows() {
        let Some(label) = row.cell(label_column) else {
            continue;
        };
        if !label.to_lowercase().contains(&needle) {
            continue;
        }

        if options.row_policy == RowPolicy::Strict && row.len() != table.headers().len() {
            return Err(ExtractError::RaggedRow {
                line: row.line,
                expected: table.headers().len(),
                found: row.len(),
            });
        }

        log::trace!("Row on line {} matches {metal}: {:?}", row.line, row.cells);

        entries.push(ResultEntry {
            resources: ColumnRole::RESOURCES.map(|role| cell_value(row, &mapping, role)),
            reserves: ColumnRole::RESERVES.map(|role| cell_value(row, &mapping, role)),
        });
    }

    if entries.is_empty() {
        return Err(ExtractError::NoData {
            metal: metal.to_owned(),
        });
    }

    log::debug!("Extracted {} rows for {metal}", entries.len());

    Ok(entries)
}

fn find_target<'a>(records: &'a [Record], anchor: &str) -> Result<&'a str, ExtractError> {
    records
        .iter()
        .filter_map(Record::text)
        .find(|text| text.contains(anchor))
        .ok_or_else(|| ExtractError::NotFound {
            anchor: anchor.to_owned(),
        })
}

fn cell_value(row: &TableRow<'_>, mapping: &ColumnMapping, role: ColumnRole) -> MetricValue {
    normalize(mapping.get(role).and_then(|index| row.cell(index)))
}
