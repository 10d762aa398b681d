//! Statistics and IndexStats.

use crate::index::types::{Indexes, RangeEntry, Slot};
use bestiary_types::RecordId;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of records indexed.
    pub num_records: usize,
    /// Number of catalog filters.
    pub num_filters: usize,
    /// Distinct normalized values across all multi-select filters.
    pub value_keys: usize,
    /// Total ids across all value postings.
    pub value_postings: usize,
    /// Distinct numeric values across all indexed range filters.
    pub range_entries: usize,
    /// Total ids across all range entries.
    pub range_postings: usize,
    /// Total ids across all flag sets.
    pub flag_postings: usize,
    /// Filters answered by a per-record scan.
    pub residual_filters: usize,
    /// Bytes of packed search text.
    pub haystack_bytes: usize,
    /// Build generation.
    pub generation: u64,
}

impl Indexes {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats::from_indexes(self)
    }
}

impl IndexStats {
    /// Constructs stats from built indexes.
    pub fn from_indexes(indexes: &Indexes) -> Self {
        let mut stats = Self {
            num_records: indexes.len,
            num_filters: indexes.slots.len(),
            value_keys: 0,
            value_postings: 0,
            range_entries: 0,
            range_postings: 0,
            flag_postings: 0,
            residual_filters: 0,
            haystack_bytes: indexes.haystacks.byte_len(),
            generation: indexes.generation,
        };

        for slot in &indexes.slots {
            match slot {
                Slot::Values(index) => {
                    stats.value_keys += index.len();
                    stats.value_postings +=
                        index.iter().map(|(_, e)| e.records.len()).sum::<usize>();
                }
                Slot::Range(index) => {
                    stats.range_entries += index.entries().len();
                    stats.range_postings += index.populated();
                }
                Slot::Flag(records) => stats.flag_postings += records.len(),
                Slot::Residual => stats.residual_filters += 1,
            }
        }

        stats
    }

    /// Returns approximate memory usage in bytes.
    ///
    /// Value keys are counted at a nominal 24 bytes each plus the entry
    /// overhead; string contents are not measured.
    pub fn memory_usage_bytes(&self) -> usize {
        let id = std::mem::size_of::<RecordId>();
        let value_size = self.value_keys * (2 * std::mem::size_of::<String>() + 24)
            + self.value_postings * id;
        let range_size = self.range_entries * std::mem::size_of::<RangeEntry>()
            + self.range_postings.saturating_sub(self.range_entries * 4) * id;
        let flag_size = self.flag_postings * id;
        let haystack_size = self.haystack_bytes + self.num_records * 2 * std::mem::size_of::<u32>();
        value_size + range_size + flag_size + haystack_size
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records, {} filters, {} values ({} postings), {} range entries ({} postings), {} flag postings",
            self.num_records,
            self.num_filters,
            self.value_keys,
            self.value_postings,
            self.range_entries,
            self.range_postings,
            self.flag_postings
        )?;

        if self.residual_filters > 0 {
            write!(f, ", {} residual", self.residual_filters)?;
        }

        Ok(())
    }
}
