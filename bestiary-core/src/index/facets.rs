//! Value tables with counts, for populating filter option lists.
//!
//! Tables are computed on demand from a specific index generation and carry
//! that generation, so a caller holding one can tell when it is stale.

use serde::{Deserialize, Serialize};

use crate::index::types::{Indexes, Slot};
use bestiary_types::{RecordId, Size};

/// Ordering for facet values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetOrder {
    /// By normalized key.
    #[default]
    Alphabetical,
    /// Most common first, ties alphabetical.
    CountDescending,
    /// Fine → Colossal, unknown sizes last.
    SizeScale,
}

/// One distinct value and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    /// Display spelling.
    pub label: String,
    /// Normalized key, as matched by the evaluator.
    pub key: String,
    /// Records carrying the value.
    pub count: usize,
}

/// Distinct values of one multi-select filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetTable {
    /// Filter key.
    pub filter: &'static str,
    /// Index generation the counts were taken from.
    pub generation: u64,
    /// Values with a non-zero count.
    pub values: Vec<FacetValue>,
}

impl FacetTable {
    /// Count for a value, matched by normalized key.
    pub fn count_of(&self, key: &str) -> usize {
        self.values
            .iter()
            .find(|v| v.key == key)
            .map_or(0, |v| v.count)
    }
}

fn membership(within: &[RecordId], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &id in within {
        if let Some(slot) = mask.get_mut(id as usize) {
            *slot = true;
        }
    }
    mask
}

impl Indexes {
    /// Distinct values of a multi-select filter with record counts.
    ///
    /// With `within`, only those records are counted and values absent from
    /// them are dropped. Returns `None` if `key` is not a multi-select filter.
    pub fn facet(
        &self,
        key: &str,
        within: Option<&[RecordId]>,
        order: FacetOrder,
    ) -> Option<FacetTable> {
        let (def, slot) = self.lookup(key)?;
        let Slot::Values(index) = slot else {
            return None;
        };

        let mask = within.map(|ids| membership(ids, self.len));
        let mut values: Vec<FacetValue> = index
            .iter()
            .filter_map(|(key, entry)| {
                let count = match &mask {
                    Some(mask) => entry
                        .records
                        .iter()
                        .filter(|&&id| mask[id as usize])
                        .count(),
                    None => entry.records.len(),
                };
                (count > 0).then(|| FacetValue {
                    label: entry.label.clone(),
                    key: key.to_owned(),
                    count,
                })
            })
            .collect();

        match order {
            FacetOrder::Alphabetical => values.sort_unstable_by(|a, b| a.key.cmp(&b.key)),
            FacetOrder::CountDescending => values
                .sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))),
            FacetOrder::SizeScale => values.sort_unstable_by_key(|v| {
                let rank = Size::parse(&v.label).map_or(u8::MAX, Size::ordinal);
                (rank, v.key.clone())
            }),
        }

        Some(FacetTable {
            filter: def.key,
            generation: self.generation,
            values,
        })
    }

    /// `(value, count)` pairs, ascending, for an indexed range filter.
    pub fn range_distribution(
        &self,
        key: &str,
        within: Option<&[RecordId]>,
    ) -> Option<Vec<(f64, usize)>> {
        let index = self.range(key)?;
        let mask = within.map(|ids| membership(ids, self.len));
        Some(
            index
                .entries()
                .iter()
                .filter_map(|e| {
                    let count = match &mask {
                        Some(mask) => e.records.iter().filter(|&&id| mask[id as usize]).count(),
                        None => e.records.len(),
                    };
                    (count > 0).then_some((e.value, count))
                })
                .collect(),
        )
    }

    /// Smallest and largest value of an indexed range filter.
    pub fn range_extent(&self, key: &str) -> Option<(f64, f64)> {
        let entries = self.range(key)?.entries();
        Some((entries.first()?.value, entries.last()?.value))
    }
}
