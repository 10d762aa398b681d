//! Index types.

use std::sync::Arc;

use crate::analyzer::{Haystacks, KeyNormalizer};
use bestiary_types::{FilterCatalog, FilterDefinition, RecordId};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Records sharing one distinct value of a multi-select attribute.
#[derive(Debug, Clone, Default)]
pub struct ValueEntry {
    /// First-seen spelling of the value, trimmed but otherwise untouched.
    pub label: String,
    /// Ascending, duplicate-free record ids.
    pub records: Vec<RecordId>,
}

/// Normalized value → records, for one multi-select filter.
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    pub(crate) entries: FxHashMap<String, ValueEntry>,
}

impl ValueIndex {
    /// Postings for an already-normalized key.
    #[inline(always)]
    pub fn postings(&self, key: &str) -> &[RecordId] {
        self.entries.get(key).map_or(&[], |e| e.records.as_slice())
    }

    /// Number of distinct values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no record carries any value.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(normalized key, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }
}

/// All records holding one exact numeric value.
#[derive(Debug, Clone)]
pub struct RangeEntry {
    /// The attribute value. Always finite.
    pub value: f64,
    /// Ascending record ids.
    pub records: SmallVec<[RecordId; 4]>,
}

/// Entries sorted ascending by value, for binary-search range scans.
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    pub(crate) entries: Vec<RangeEntry>,
    pub(crate) populated: usize,
}

impl RangeIndex {
    /// The sorted entries.
    #[inline(always)]
    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    /// Number of records with a value.
    #[inline(always)]
    pub fn populated(&self) -> usize {
        self.populated
    }

    /// Entries whose value lies in `[min, max]`, either side optional.
    ///
    /// A NaN bound yields no entries.
    pub fn window(&self, min: Option<f64>, max: Option<f64>) -> &[RangeEntry] {
        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return &[];
        }
        let lo = min.map_or(0, |m| self.entries.partition_point(|e| e.value < m));
        let hi = max.map_or(self.entries.len(), |m| {
            self.entries.partition_point(|e| e.value <= m)
        });
        if lo >= hi {
            return &[];
        }
        &self.entries[lo..hi]
    }
}

/// The index structure serving one catalog definition.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Multi-select value map.
    Values(ValueIndex),
    /// Sorted numeric array.
    Range(RangeIndex),
    /// Ascending ids of records for which the flag holds.
    Flag(Vec<RecordId>),
    /// Nothing prebuilt; checked per record at query time.
    Residual,
}

/// Read-only indexes over one dataset.
///
/// Holds record ids only. The records themselves are owned by the caller and
/// must be passed, unchanged and in the same order, to every query.
#[derive(Debug, Clone)]
pub struct Indexes {
    pub(crate) catalog: Arc<FilterCatalog>,
    /// Parallel to `catalog.definitions()`.
    pub(crate) slots: Vec<Slot>,
    pub(crate) haystacks: Haystacks,
    pub(crate) normalizer: KeyNormalizer,
    pub(crate) len: usize,
    pub(crate) generation: u64,
}

impl Indexes {
    /// Number of records indexed.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dataset was empty.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Build generation. Increments on every reload through [`crate::Bestiary`].
    #[inline(always)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The catalog these indexes were built for.
    #[inline(always)]
    pub fn catalog(&self) -> &Arc<FilterCatalog> {
        &self.catalog
    }

    /// The key normalizer used at build time.
    #[inline(always)]
    pub fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    /// Packed search text.
    #[inline(always)]
    pub fn haystacks(&self) -> &Haystacks {
        &self.haystacks
    }

    /// Definition and slot for `key`.
    pub fn lookup(&self, key: &str) -> Option<(&FilterDefinition, &Slot)> {
        let pos = self.catalog.position(key)?;
        Some((&self.catalog.definitions()[pos], &self.slots[pos]))
    }

    /// Value index for a multi-select key.
    pub fn values(&self, key: &str) -> Option<&ValueIndex> {
        match self.lookup(key)? {
            (_, Slot::Values(index)) => Some(index),
            _ => None,
        }
    }

    /// Sorted array for an indexed range key.
    pub fn range(&self, key: &str) -> Option<&RangeIndex> {
        match self.lookup(key)? {
            (_, Slot::Range(index)) => Some(index),
            _ => None,
        }
    }

    /// Flag postings for a boolean key.
    pub fn flag(&self, key: &str) -> Option<&[RecordId]> {
        match self.lookup(key)? {
            (_, Slot::Flag(records)) => Some(records),
            _ => None,
        }
    }

    /// Every record id, ascending.
    #[inline]
    pub fn all_ids(&self) -> Vec<RecordId> {
        (0..self.len as RecordId).collect()
    }
}
