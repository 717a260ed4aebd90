//! Header label classification.
//!
//! Resource tables label their columns inconsistently ("Measured Mt",
//! "Measured resources %Cu", "Indicated ppm U3O8 |", ...). Each header is
//! classified against [`HEADER_RULES`], an ordered list of
//! (section keyword, unit, role) entries:
//!
//! 1. The first rule whose section keyword occurs in the header claims the
//!    header for that section.
//! 2. Within the claimed section, the first rule whose unit matches decides
//!    the role. If no unit matches the header stays unclassified; it is
//!    never handed to a later section.
//!
//! Adding a role or a unit means adding a row to the table.

use mineral_table_extract_models::ColumnRole;
use regex::{Regex, RegexBuilder};

/// How a rule recognises the unit part of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMatcher {
    /// Any header in the section.
    Any,
    /// Header contains this literal, case-sensitive.
    Literal(&'static str),
    /// Header contains this prefix immediately followed by the metal
    /// symbol, case-insensitive (e.g. `%` + `Cu` matches `%cu`).
    MetalSuffixed(&'static str),
}

/// One classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule {
    /// Case-sensitive keyword selecting the section.
    pub section: &'static str,
    /// Unit test applied once the section is selected.
    pub unit: UnitMatcher,
    /// Role assigned on match.
    pub role: ColumnRole,
}

const fn rule(section: &'static str, unit: UnitMatcher, role: ColumnRole) -> HeaderRule {
    HeaderRule {
        section,
        unit,
        role,
    }
}

/// Classification rules in priority order.
pub const HEADER_RULES: &[HeaderRule] = &[
    rule("Ore type", UnitMatcher::Any, ColumnRole::OreType),
    // ── Measured ─────────────────────────────────────────────────────
    rule(
        "Measured",
        UnitMatcher::Literal("Mt"),
        ColumnRole::MeasuredTonnage,
    ),
    rule(
        "Measured",
        UnitMatcher::MetalSuffixed("%"),
        ColumnRole::MeasuredGradePercent,
    ),
    rule(
        "Measured",
        UnitMatcher::MetalSuffixed("ppm"),
        ColumnRole::MeasuredPpm,
    ),
    rule(
        "Measured",
        UnitMatcher::MetalSuffixed("g/t"),
        ColumnRole::MeasuredGpt,
    ),
    // ── Indicated ────────────────────────────────────────────────────
    rule(
        "Indicated",
        UnitMatcher::Literal("Mt"),
        ColumnRole::IndicatedTonnage,
    ),
    rule(
        "Indicated",
        UnitMatcher::MetalSuffixed("%"),
        ColumnRole::IndicatedGradePercent,
    ),
    rule(
        "Indicated",
        UnitMatcher::MetalSuffixed("ppm"),
        ColumnRole::IndicatedPpm,
    ),
];

/// Classifies header labels for a single metal.
///
/// Metal-suffixed unit patterns are compiled once per classifier. The
/// metal symbol is escaped, so symbols such as `U3O8` or `C.u` match
/// literally.
#[derive(Debug)]
pub struct HeaderClassifier {
    patterns: Vec<(&'static str, Regex)>,
}

impl HeaderClassifier {
    /// Builds a classifier for `metal` using [`HEADER_RULES`].
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a unit pattern fails to compile.
    pub fn new(metal: &str) -> Result<Self, regex::Error> {
        let mut patterns: Vec<(&'static str, Regex)> = Vec::new();

        for rule in HEADER_RULES {
            let UnitMatcher::MetalSuffixed(prefix) = rule.unit else {
                continue;
            };
            if patterns.iter().any(|(p, _)| *p == prefix) {
                continue;
            }
            let re = RegexBuilder::new(&regex::escape(&format!("{prefix}{metal}")))
                .case_insensitive(true)
                .build()?;
            patterns.push((prefix, re));
        }

        Ok(Self { patterns })
    }

    /// Returns the role for `header`, or `None` if no rule applies.
    #[must_use]
    pub fn classify(&self, header: &str) -> Option<ColumnRole> {
        let section = HEADER_RULES
            .iter()
            .map(|r| r.section)
            .find(|section| header.contains(section))?;

        HEADER_RULES
            .iter()
            .filter(|r| r.section == section)
            .find(|r| self.unit_matches(r.unit, header))
            .map(|r| r.role)
    }

    fn unit_matches(&self, unit: UnitMatcher, header: &str) -> bool {
        match unit {
            UnitMatcher::Any => true,
            UnitMatcher::Literal(needle) => header.contains(needle),
            UnitMatcher::MetalSuffixed(prefix) => self
                .patterns
                .iter()
                .find(|(p, _)| *p == prefix)
                .is_some_and(|(_, re)| re.is_match(header)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(metal: &str, header: &str) -> Option<ColumnRole> {
        HeaderClassifier::new(metal).unwrap().classify(header)
    }

    #[test]
    fn classifies_copper_headers() {
        assert_eq!(classify("Cu", "Ore type"), Some(ColumnRole::OreType));
        assert_eq!(
            classify("Cu", "Measured Mt"),
            Some(ColumnRole::MeasuredTonnage)
        );
        assert_eq!(
            classify("Cu", "Measured %Cu"),
            Some(ColumnRole::MeasuredGradePercent)
        );
        assert_eq!(
            classify("Cu", "Indicated Mt"),
            Some(ColumnRole::IndicatedTonnage)
        );
        assert_eq!(
            classify("Cu", "Indicated %Cu |"),
            Some(ColumnRole::IndicatedGradePercent)
        );
    }

    #[test]
    fn classifies_trace_metal_units() {
        assert_eq!(
            classify("U3O8", "Measured ppmU3O8"),
            Some(ColumnRole::MeasuredPpm)
        );
        assert_eq!(
            classify("U3O8", "Indicated ppmU3O8"),
            Some(ColumnRole::IndicatedPpm)
        );
        assert_eq!(
            classify("Au", "Measured g/tAu"),
            Some(ColumnRole::MeasuredGpt)
        );
        // No g/t rule for the indicated section
        assert_eq!(classify("Au", "Indicated g/tAu"), None);
    }

    #[test]
    fn metal_patterns_ignore_case() {
        assert_eq!(
            classify("cu", "Measured %CU"),
            Some(ColumnRole::MeasuredGradePercent)
        );
        assert_eq!(
            classify("AG", "Measured g/tag"),
            Some(ColumnRole::MeasuredGpt)
        );
    }

    #[test]
    fn section_and_tonnage_keywords_are_case_sensitive() {
        assert_eq!(classify("Cu", "measured Mt"), None);
        assert_eq!(classify("Cu", "ore type"), None);
        assert_eq!(classify("Cu", "Measured mt"), None);
    }

    #[test]
    fn tonnage_wins_over_grade_in_same_header() {
        assert_eq!(
            classify("Cu", "Measured Mt %Cu"),
            Some(ColumnRole::MeasuredTonnage)
        );
    }

    #[test]
    fn ore_type_claims_header_before_measured() {
        assert_eq!(
            classify("Cu", "Ore type (Measured Mt)"),
            Some(ColumnRole::OreType)
        );
    }

    #[test]
    fn unmatched_unit_does_not_fall_through() {
        // Claimed by the measured section, which has no rule for it
        assert_eq!(classify("Cu", "Measured and Indicated kt"), None);
        assert_eq!(classify("Cu", "Measured %Au"), None);
        assert_eq!(classify("Cu", "Grade %Cu"), None);
    }

    #[test]
    fn metal_symbol_is_matched_literally() {
        assert_eq!(classify("C.", "Measured %Cu"), None);
        assert_eq!(
            classify("C.", "Measured %C."),
            Some(ColumnRole::MeasuredGradePercent)
        );
        assert_eq!(
            classify("U+", "Measured ppmU+"),
            Some(ColumnRole::MeasuredPpm)
        );
    }

    #[test]
    fn compiles_one_pattern_per_prefix() {
        let classifier = HeaderClassifier::new("Cu").unwrap();
        let prefixes: Vec<&str> = classifier.patterns.iter().map(|(p, _)| *p).collect();
        assert_eq!(prefixes, vec!["%", "ppm", "g/t"]);
    }
}
