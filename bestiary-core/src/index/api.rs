//! Public facade owning a dataset and its indexes.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::index::builder::build_generation;
use crate::index::facets::{FacetOrder, FacetTable};
use crate::index::predict::PredictedChange;
use crate::index::stats::IndexStats;
use crate::index::types::Indexes;
use crate::order::{self, SortDirection, SortField};
use bestiary_types::{Creature, EngineConfig, FilterCatalog, FilterState, RecordId};

use rustc_hash::FxHashMap;

/// A dataset, its filter catalog and the indexes built over it.
///
/// Everything here is read-only between reloads, so a `&Bestiary` can serve
/// any number of queries. [`Bestiary::reload`] builds the new indexes in full
/// before replacing anything.
#[derive(Debug, Clone)]
pub struct Bestiary {
    records: Vec<Creature>,
    by_id: FxHashMap<String, RecordId>,
    config: EngineConfig,
    indexes: Indexes,
}

impl Bestiary {
    /// Indexes `records` with the standard catalog and default configuration.
    pub fn new(records: Vec<Creature>) -> Self {
        Self::with_config(
            records,
            Arc::new(FilterCatalog::standard()),
            EngineConfig::default(),
        )
    }

    /// Indexes `records` with a custom catalog and configuration.
    ///
    /// # Panics
    ///
    /// Panics if the catalog holds an inconsistent definition.
    pub fn with_config(
        records: Vec<Creature>,
        catalog: Arc<FilterCatalog>,
        config: EngineConfig,
    ) -> Self {
        let indexes = build_generation(&records, catalog, &config, 0);
        let by_id = id_map(&records);
        Self {
            records,
            by_id,
            config,
            indexes,
        }
    }

    /// Replaces the dataset. Indexes are rebuilt wholesale and the
    /// generation advances.
    pub fn reload(&mut self, records: Vec<Creature>) {
        let generation = self.indexes.generation + 1;
        let indexes = build_generation(
            &records,
            Arc::clone(&self.indexes.catalog),
            &self.config,
            generation,
        );
        let by_id = id_map(&records);

        self.records = records;
        self.by_id = by_id;
        self.indexes = indexes;
        log::debug!(
            "reloaded {} records, generation {}",
            self.records.len(),
            generation
        );
    }

    /// Number of records.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in id order.
    #[inline(always)]
    pub fn records(&self) -> &[Creature] {
        &self.records
    }

    /// The built indexes.
    #[inline(always)]
    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    /// The filter catalog.
    #[inline(always)]
    pub fn catalog(&self) -> &FilterCatalog {
        &self.indexes.catalog
    }

    /// The engine configuration.
    #[inline(always)]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Index build generation.
    #[inline(always)]
    pub fn generation(&self) -> u64 {
        self.indexes.generation
    }

    /// Record by dense id.
    #[inline]
    pub fn get(&self, id: RecordId) -> Option<&Creature> {
        self.records.get(id as usize)
    }

    /// Record by its stable string id.
    ///
    /// Ids are expected to be unique. If a dataset repeats one, the first
    /// record carrying it wins and the collision is logged at build time.
    pub fn find(&self, id: &str) -> Option<(RecordId, &Creature)> {
        let &record_id = self.by_id.get(id)?;
        Some((record_id, &self.records[record_id as usize]))
    }

    /// Ids matching `state`, ascending.
    pub fn evaluate_ids(&self, state: &FilterState) -> Vec<RecordId> {
        self.indexes.evaluate(&self.records, state)
    }

    /// Records matching `state`, in input order.
    pub fn evaluate(&self, state: &FilterState) -> Vec<&Creature> {
        self.resolve(&self.evaluate_ids(state))
    }

    /// Number of records matching `state`.
    pub fn count(&self, state: &FilterState) -> usize {
        self.indexes.count(&self.records, state)
    }

    /// Count after toggling `value` under `key`.
    pub fn predicted_count(&self, state: &FilterState, key: &str, value: &str) -> usize {
        self.indexes
            .predicted_count(&self.records, state, key, value)
    }

    /// Count after applying `change` to a copy of `state`.
    pub fn predicted_count_with(&self, state: &FilterState, change: PredictedChange<'_>) -> usize {
        self.indexes
            .predicted_count_with(&self.records, state, change)
    }

    /// Records matching `state`, sorted.
    pub fn sorted(
        &self,
        state: &FilterState,
        field: SortField,
        direction: SortDirection,
    ) -> Vec<&Creature> {
        let mut ids = self.evaluate_ids(state);
        order::sort_ids(&mut ids, &self.records, field, direction);
        self.resolve(&ids)
    }

    /// One page of sorted matches, using the configured page size.
    pub fn page(
        &self,
        state: &FilterState,
        field: SortField,
        direction: SortDirection,
        page: usize,
    ) -> Vec<&Creature> {
        let mut ids = self.evaluate_ids(state);
        order::sort_ids(&mut ids, &self.records, field, direction);
        self.resolve(order::paginate(&ids, self.config.page_size, page))
    }

    /// Number of pages the matches of `state` span.
    pub fn page_count(&self, state: &FilterState) -> usize {
        order::page_count(self.count(state), self.config.page_size)
    }

    /// Distinct values of a multi-select filter, optionally restricted to
    /// the matches of `state`.
    pub fn facet(
        &self,
        key: &str,
        state: Option<&FilterState>,
        order: FacetOrder,
    ) -> Option<FacetTable> {
        match state {
            Some(state) => {
                let ids = self.evaluate_ids(state);
                self.indexes.facet(key, Some(&ids), order)
            }
            None => self.indexes.facet(key, None, order),
        }
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        self.indexes.stats()
    }

    fn resolve(&self, ids: &[RecordId]) -> Vec<&Creature> {
        ids.iter().map(|&id| &self.records[id as usize]).collect()
    }
}

fn id_map(records: &[Creature]) -> FxHashMap<String, RecordId> {
    let mut map = FxHashMap::default();
    map.reserve(records.len());
    for (position, creature) in records.iter().enumerate() {
        match map.entry(creature.id.clone()) {
            Entry::Occupied(first) => log::warn!(
                "duplicate record id `{}` at position {}, `find` keeps position {}",
                creature.id,
                position,
                first.get()
            ),
            Entry::Vacant(slot) => {
                slot.insert(position as RecordId);
            }
        }
    }
    map
}
