//! Filter evaluation.
//!
//! Each active predicate resolves to an ascending id list. Lists are
//! intersected smallest-first, then residual range filters and the free-text
//! search run as linear passes over what survives.

use std::borrow::Cow;

use crate::index::sets::{complement, intersect_all, union_all};
use crate::index::types::{Indexes, Slot, ValueIndex};
use bestiary_types::{
    Accessor, Creature, FilterKind, FilterState, MatchMode, RangeBound, RecordId,
};

use smallvec::SmallVec;

struct Residual {
    accessor: Accessor,
    bound: RangeBound,
}

impl Indexes {
    /// Ids of records matching `state`, ascending.
    ///
    /// `records` should be the slice the indexes were built from. Ids past
    /// its end fail every residual range filter instead of panicking. Keys
    /// the catalog does not know are ignored; inconsistent bounds such as
    /// `min > max` simply match nothing.
    #[inline(never)]
    pub fn evaluate(&self, records: &[Creature], state: &FilterState) -> Vec<RecordId> {
        if log::log_enabled!(log::Level::Trace) {
            self.trace_unknown_keys(state);
        }

        let mut sets: SmallVec<[Cow<'_, [RecordId]>; 8]> = SmallVec::new();
        let mut residuals: SmallVec<[Residual; 4]> = SmallVec::new();

        for (def, slot) in self.catalog.iter().zip(&self.slots) {
            match (def.kind, slot) {
                (FilterKind::MultiSelect, Slot::Values(index)) => {
                    let selected = state.selected(def.key);
                    if selected.is_empty() {
                        continue;
                    }
                    let matched =
                        self.select_values(index, selected, state.match_mode(def.key));
                    let matched = if state.is_excluded(def.key) {
                        complement(&matched, self.len)
                    } else {
                        matched
                    };
                    sets.push(Cow::Owned(matched));
                }
                (FilterKind::Range, Slot::Range(index)) => {
                    let Some(bound) = state.range(def.key).filter(RangeBound::is_active) else {
                        continue;
                    };
                    let mut ids: Vec<RecordId> = index
                        .window(bound.min, bound.max)
                        .iter()
                        .flat_map(|e| e.records.iter().copied())
                        .collect();
                    ids.sort_unstable();
                    sets.push(Cow::Owned(ids));
                }
                (FilterKind::Range, Slot::Residual) => {
                    if let Some(bound) = state.range(def.key).filter(RangeBound::is_active) {
                        residuals.push(Residual {
                            accessor: def.accessor,
                            bound,
                        });
                    }
                }
                (FilterKind::Boolean, Slot::Flag(holders)) => match state.flag(def.key) {
                    Some(true) => sets.push(Cow::Borrowed(holders.as_slice())),
                    Some(false) => sets.push(Cow::Owned(complement(holders, self.len))),
                    None => {}
                },
                _ => unreachable!("slot for `{}` does not match its kind", def.key),
            }
        }

        let mut borrowed: SmallVec<[&[RecordId]; 8]> = sets.iter().map(|s| &**s).collect();
        let mut candidates = intersect_all(&mut borrowed).unwrap_or_else(|| self.all_ids());

        if !residuals.is_empty() {
            candidates.retain(|&id| {
                let Some(creature) = records.get(id as usize) else {
                    return false;
                };
                residuals.iter().all(|r| {
                    r.accessor
                        .number(creature)
                        .is_some_and(|value| r.bound.contains(value))
                })
            });
        }

        if !state.search.trim().is_empty() {
            self.haystacks
                .retain_matching(&self.normalizer, &state.search, &mut candidates);
        }

        candidates
    }

    /// Number of records matching `state`.
    #[inline]
    pub fn count(&self, records: &[Creature], state: &FilterState) -> usize {
        self.evaluate(records, state).len()
    }

    fn select_values(
        &self,
        index: &ValueIndex,
        selected: &[String],
        mode: MatchMode,
    ) -> Vec<RecordId> {
        let mut key_buf = String::with_capacity(32);
        let mut postings: SmallVec<[&[RecordId]; 8]> = SmallVec::with_capacity(selected.len());
        for value in selected {
            self.normalizer.normalize_into(value, &mut key_buf);
            postings.push(index.postings(&key_buf));
        }

        match mode {
            MatchMode::Any => union_all(postings.iter().copied()),
            MatchMode::All => intersect_all(&mut postings).unwrap_or_default(),
        }
    }

    fn trace_unknown_keys(&self, state: &FilterState) {
        let keys = state
            .selections
            .keys()
            .chain(state.ranges.keys())
            .chain(state.flags.keys())
            .chain(state.exclude_mode.keys())
            .chain(state.filter_mode.keys());
        for key in keys {
            if self.catalog.position(key).is_none() {
                log::trace!("ignoring unknown filter key `{key}`");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::index::build_indexes;
    use bestiary_types::catalog::keys;
    use bestiary_types::{AbilityScores, EngineConfig, FilterCatalog};

    fn creature(name: &str, kind: &str, cr: Option<f64>, languages: &[&str]) -> Creature {
        Creature {
            name: name.into(),
            creature_type: Some(kind.into()),
            challenge_rating: cr,
            languages: languages.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn dataset() -> Vec<Creature> {
        vec![
            creature("Red Dragon", "dragon", Some(14.0), &["Common", "Draconic"]),
            creature("Kobold", "humanoid", Some(0.25), &["Draconic"]),
            creature("Goblin", "humanoid", Some(1.0 / 3.0), &["Goblin", "Common"]),
            creature("Zombie", "undead", Some(0.5), &[]),
            creature("Mystery", "aberration", None, &["Aklo"]),
        ]
    }

    fn build(records: &[Creature]) -> Indexes {
        build_indexes(
            records,
            Arc::new(FilterCatalog::standard()),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn empty_state_returns_everything() {
        let records = dataset();
        let indexes = build(&records);
        assert_eq!(indexes.evaluate(&records, &FilterState::new()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn any_unions_values_case_insensitively() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::TYPE, "HUMANOID");
        state.select(keys::TYPE, "Undead");
        assert_eq!(indexes.evaluate(&records, &state), vec![1, 2, 3]);
    }

    #[test]
    fn all_requires_every_value() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::LANGUAGES, "common");
        state.select(keys::LANGUAGES, "draconic");
        assert_eq!(indexes.evaluate(&records, &state), vec![0, 1, 2]);

        state.set_match_mode(keys::LANGUAGES, MatchMode::All);
        assert_eq!(indexes.evaluate(&records, &state), vec![0]);
    }

    #[test]
    fn all_with_unknown_value_is_empty() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::LANGUAGES, "common");
        state.select(keys::LANGUAGES, "sylvan");
        state.set_match_mode(keys::LANGUAGES, MatchMode::All);
        assert!(indexes.evaluate(&records, &state).is_empty());
    }

    #[test]
    fn exclude_complements_including_records_without_values() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::LANGUAGES, "common");
        state.set_exclude(keys::LANGUAGES, true);
        assert_eq!(indexes.evaluate(&records, &state), vec![1, 3, 4]);
    }

    #[test]
    fn exclude_composes_with_all() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::LANGUAGES, "common");
        state.select(keys::LANGUAGES, "draconic");
        state.set_match_mode(keys::LANGUAGES, MatchMode::All);
        state.set_exclude(keys::LANGUAGES, true);
        assert_eq!(indexes.evaluate(&records, &state), vec![1, 2, 3, 4]);
    }

    #[test]
    fn indexed_range_excludes_missing_values() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_range(keys::CR, RangeBound::at_most(0.5));
        assert_eq!(indexes.evaluate(&records, &state), vec![1, 2, 3]);

        state.set_range(keys::CR, RangeBound::between(0.25, 0.25));
        assert_eq!(indexes.evaluate(&records, &state), vec![1]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_range(keys::CR, RangeBound::between(10.0, 1.0));
        assert!(indexes.evaluate(&records, &state).is_empty());
    }

    #[test]
    fn residual_range_scans_reduced_set() {
        let mut records = dataset();
        records[0].ability_scores = AbilityScores {
            strength: Some(29.0),
            ..Default::default()
        };
        records[2].ability_scores = AbilityScores {
            strength: Some(8.0),
            ..Default::default()
        };
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_range(keys::STR, RangeBound::at_least(8.0));
        assert_eq!(indexes.evaluate(&records, &state), vec![0, 2]);

        state.select(keys::TYPE, "humanoid");
        assert_eq!(indexes.evaluate(&records, &state), vec![2]);
    }

    #[test]
    fn boolean_true_and_false() {
        let mut records = dataset();
        records[3].attacks.melee = vec!["slam +4 (1d6+4)".into()];
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_flag(keys::HAS_MELEE_ATTACKS, Some(true));
        assert_eq!(indexes.evaluate(&records, &state), vec![3]);
        state.set_flag(keys::HAS_MELEE_ATTACKS, Some(false));
        assert_eq!(indexes.evaluate(&records, &state), vec![0, 1, 2, 4]);
    }

    #[test]
    fn search_runs_over_filtered_set() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_search("o");
        assert_eq!(indexes.evaluate(&records, &state), vec![0, 1, 2, 3, 4]);
        // Matches on the type alone.
        state.set_search("aberr");
        assert_eq!(indexes.evaluate(&records, &state), vec![4]);
        state.select(keys::TYPE, "humanoid");
        state.set_search("GOB");
        assert_eq!(indexes.evaluate(&records, &state), vec![2]);
    }

    #[test]
    fn short_record_slice_fails_residual_ranges() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.set_range(keys::STR, RangeBound::at_most(100.0));
        state.set_range(keys::CR, RangeBound::at_least(0.0));

        let full: Vec<Creature> = records
            .iter()
            .cloned()
            .map(|mut c| {
                c.ability_scores.strength = Some(10.0);
                c
            })
            .collect();
        assert_eq!(indexes.evaluate(&full, &state), vec![0, 1, 2, 3]);
        assert_eq!(indexes.evaluate(&full[..2], &state), vec![0, 1]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select("colour", "red");
        state.set_flag("isCute", Some(true));
        assert_eq!(indexes.count(&records, &state), records.len());
    }

    #[test]
    fn state_is_not_mutated() {
        let records = dataset();
        let indexes = build(&records);
        let mut state = FilterState::new();
        state.select(keys::TYPE, "dragon");
        let before = state.clone();
        let _ = indexes.evaluate(&records, &state);
        assert_eq!(state, before);
    }
}
