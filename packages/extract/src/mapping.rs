//! Column role to column index mapping.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use mineral_table_extract_models::ColumnRole;

use crate::rules::HeaderClassifier;

/// Resolved column index for each [`ColumnRole`] found in a header.
///
/// Built once per extraction and read-only afterwards. When several headers
/// classify to the same role, the leftmost one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<ColumnRole, usize>,
}

impl ColumnMapping {
    /// Classifies each header in order and records the first column seen
    /// for every role.
    #[must_use]
    pub fn from_headers<S: AsRef<str>>(headers: &[S], classifier: &HeaderClassifier) -> Self {
        let mut columns = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            let Some(role) = classifier.classify(header) else {
                continue;
            };
            match columns.entry(role) {
                Entry::Vacant(slot) => {
                    log::trace!("Column {index} ({header:?}) -> {role}");
                    slot.insert(index);
                }
                Entry::Occupied(existing) => {
                    log::debug!(
                        "Ignoring column {index} ({header:?}): {role} already mapped to column {}",
                        existing.get()
                    );
                }
            }
        }

        Self { columns }
    }

    /// Column index for `role`, or `None` if no header matched it.
    #[must_use]
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    /// Returns `true` if some header matched `role`.
    #[must_use]
    pub fn is_resolved(&self, role: ColumnRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// Roles no header matched, in [`ColumnRole::ALL`] order.
    pub fn unresolved(&self) -> impl Iterator<Item = ColumnRole> + '_ {
        ColumnRole::ALL
            .iter()
            .copied()
            .filter(|role| !self.is_resolved(*role))
    }

    /// Number of resolved roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no role was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
