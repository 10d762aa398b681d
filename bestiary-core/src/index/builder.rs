//! Index building logic.

use std::sync::Arc;

use crate::analyzer::{Haystacks, KeyNormalizer, NormalizerConfig};
use crate::index::types::{Indexes, RangeEntry, RangeIndex, Slot, ValueEntry, ValueIndex};
use bestiary_types::{
    Creature, EngineConfig, FilterCatalog, FilterDefinition, FilterKind, IndexStrategy, RecordId,
};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Builds indexes for `records` against `catalog`.
///
/// Record `i` gets id `i`. Missing or blank attributes contribute nothing.
///
/// # Panics
///
/// Panics if a catalog definition is internally inconsistent: its declared
/// kind does not match its accessor, or a non-range filter is marked
/// residual. Both are programming errors in the catalog, not data issues.
pub fn build_indexes(
    records: &[Creature],
    catalog: Arc<FilterCatalog>,
    config: &EngineConfig,
) -> Indexes {
    build_generation(records, catalog, config, 0)
}

pub(crate) fn build_generation(
    records: &[Creature],
    catalog: Arc<FilterCatalog>,
    config: &EngineConfig,
    generation: u64,
) -> Indexes {
    assert!(
        records.len() <= RecordId::MAX as usize,
        "dataset of {} records exceeds the id space",
        records.len()
    );

    let normalizer = KeyNormalizer::new(NormalizerConfig {
        strip_diacritics: config.fold_diacritics,
    });

    let slots: Vec<Slot> = catalog
        .iter()
        .map(|def| build_slot(def, records, &normalizer))
        .collect();
    let haystacks = Haystacks::build(records, &normalizer, config);

    let indexes = Indexes {
        catalog,
        slots,
        haystacks,
        normalizer,
        len: records.len(),
        generation,
    };

    let stats = indexes.stats();
    log::debug!(
        "built indexes generation {}: {} ({} bytes)",
        generation,
        stats,
        stats.memory_usage_bytes()
    );

    indexes
}

fn build_slot(def: &FilterDefinition, records: &[Creature], normalizer: &KeyNormalizer) -> Slot {
    assert!(
        def.is_consistent(),
        "filter `{}` is declared {} but its accessor serves {}",
        def.key,
        def.kind,
        def.accessor.natural_kind()
    );

    match (def.kind, def.strategy) {
        (FilterKind::MultiSelect, IndexStrategy::Indexed) => {
            Slot::Values(build_values(def, records, normalizer))
        }
        (FilterKind::Range, IndexStrategy::Indexed) => Slot::Range(build_range(def, records)),
        (FilterKind::Range, IndexStrategy::Residual) => Slot::Residual,
        (FilterKind::Boolean, IndexStrategy::Indexed) => Slot::Flag(
            records
                .iter()
                .enumerate()
                .filter(|(_, c)| def.accessor.flag(c))
                .map(|(id, _)| id as RecordId)
                .collect(),
        ),
        (kind, IndexStrategy::Residual) => {
            panic!("filter `{}` is a {} filter and cannot be residual", def.key, kind)
        }
    }
}

fn build_values(
    def: &FilterDefinition,
    records: &[Creature],
    normalizer: &KeyNormalizer,
) -> ValueIndex {
    let mut entries: FxHashMap<String, ValueEntry> = FxHashMap::default();
    let mut key_buf = String::with_capacity(64);

    for (id, creature) in records.iter().enumerate() {
        let id = id as RecordId;
        def.accessor.for_each_value(creature, |value| {
            normalizer.normalize_into(value, &mut key_buf);
            if key_buf.is_empty() {
                return;
            }
            if !entries.contains_key(key_buf.as_str()) {
                entries.insert(
                    key_buf.clone(),
                    ValueEntry {
                        label: value.to_owned(),
                        records: Vec::new(),
                    },
                );
            }
            if let Some(entry) = entries.get_mut(key_buf.as_str()) {
                // A record listing the same value twice is indexed once.
                if entry.records.last() != Some(&id) {
                    entry.records.push(id);
                }
            }
        });
    }

    ValueIndex { entries }
}

fn build_range(def: &FilterDefinition, records: &[Creature]) -> RangeIndex {
    let mut groups: FxHashMap<u64, SmallVec<[RecordId; 4]>> = FxHashMap::default();
    let mut populated = 0usize;

    for (id, creature) in records.iter().enumerate() {
        if let Some(value) = def.accessor.number(creature) {
            // -0.0 and 0.0 are one value.
            let value = if value == 0.0 { 0.0 } else { value };
            groups.entry(value.to_bits()).or_default().push(id as RecordId);
            populated += 1;
        }
    }

    let mut entries: Vec<RangeEntry> = groups
        .into_iter()
        .map(|(bits, records)| RangeEntry {
            value: f64::from_bits(bits),
            records,
        })
        .collect();
    entries.sort_unstable_by(|a, b| a.value.total_cmp(&b.value));

    RangeIndex { entries, populated }
}
