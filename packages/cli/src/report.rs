//! Running extractions for several metals and rendering the results.

use std::fmt::Write as _;

use mineral_table_extract::{
    ExtractError, ExtractOptions, MetricValue, Record, ResultEntry, extract_with,
};

/// Result of extracting one metal.
#[derive(Debug)]
pub struct MetalOutcome {
    /// Requested metal symbol.
    pub metal: String,
    /// Extracted rows, or why there are none.
    pub result: Result<Vec<ResultEntry>, ExtractError>,
}

/// Drops repeated metal symbols, keeping the first occurrence of each.
///
/// Outcomes are keyed by metal in the JSON report, so a repeated symbol
/// would only overwrite itself.
pub fn dedup_metals(metals: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    metals
        .into_iter()
        .filter(|metal| seen.insert(metal.clone()))
        .collect()
}

/// Extracts each metal in turn. A failure for one metal does not stop the
/// others.
pub fn run(records: &[Record], metals: &[String], options: &ExtractOptions) -> Vec<MetalOutcome> {
    metals
        .iter()
        .map(|metal| {
            let result = extract_with(records, metal, options);
            match &result {
                Ok(entries) => log::info!("{metal}: {} rows", entries.len()),
                Err(e) => log::warn!("{metal}: {e}"),
            }
            MetalOutcome {
                metal: metal.clone(),
                result,
            }
        })
        .collect()
}

/// Renders successful outcomes as indented `Resources`/`Reserves` lines.
pub fn format_text(outcomes: &[MetalOutcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        let Ok(entries) = &outcome.result else {
            continue;
        };
        writeln!(out, "{}:", outcome.metal).unwrap();
        for entry in entries {
            writeln!(out, "  Resources: {}", format_slots(&entry.resources)).unwrap();
            writeln!(out, "  Reserves: {}", format_slots(&entry.reserves)).unwrap();
        }
    }

    out
}

/// Renders all outcomes as a JSON object keyed by metal. Failed metals map
/// to `{"error": "..."}`.
pub fn to_json(outcomes: &[MetalOutcome]) -> Result<serde_json::Value, serde_json::Error> {
    let mut map = serde_json::Map::new();

    for outcome in outcomes {
        let value = match &outcome.result {
            Ok(entries) => serde_json::to_value(entries)?,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        map.insert(outcome.metal.clone(), value);
    }

    Ok(serde_json::Value::Object(map))
}

fn format_slots(slots: &[MetricValue]) -> String {
    let parts: Vec<String> = slots.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
