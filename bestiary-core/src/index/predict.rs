//! Predictive counts: "N results if you also click X".

use crate::analyzer::KeyNormalizer;
use crate::index::types::Indexes;
use bestiary_types::{Creature, FilterState, RangeBound};

/// A hypothetical edit to a filter state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictedChange<'a> {
    /// Toggle one multi-select value, as a click on the option would.
    Toggle {
        /// Filter key.
        key: &'a str,
        /// Candidate value.
        value: &'a str,
    },
    /// Set or clear a boolean filter.
    Flag {
        /// Filter key.
        key: &'a str,
        /// New required value, `None` to unset.
        value: Option<bool>,
    },
    /// Replace a range filter's bound.
    Range {
        /// Filter key.
        key: &'a str,
        /// New bound. An inactive bound clears the filter.
        bound: RangeBound,
    },
}

impl PredictedChange<'_> {
    /// Applies the change to `state`.
    ///
    /// Toggled values are compared through `normalizer`, so a candidate the
    /// index would treat as an already selected value removes it.
    pub fn apply(&self, state: &mut FilterState, normalizer: &KeyNormalizer) {
        match *self {
            PredictedChange::Toggle { key, value } => {
                state.toggle_by(key, value, |a, b| normalizer.same_key(a, b));
            }
            PredictedChange::Flag { key, value } => state.set_flag(key, value),
            PredictedChange::Range { key, bound } => state.set_range(key, bound),
        }
    }
}

impl Indexes {
    /// Count after toggling `value` under `key`, leaving `state` untouched.
    pub fn predicted_count(
        &self,
        records: &[Creature],
        state: &FilterState,
        key: &str,
        value: &str,
    ) -> usize {
        self.predicted_count_with(records, state, PredictedChange::Toggle { key, value })
    }

    /// Count after applying `change` to a copy of `state`.
    ///
    /// Runs a full evaluation per call. Nothing is cached.
    pub fn predicted_count_with(
        &self,
        records: &[Creature],
        state: &FilterState,
        change: PredictedChange<'_>,
    ) -> usize {
        let mut simulated = state.clone();
        change.apply(&mut simulated, &self.normalizer);
        self.count(records, &simulated)
    }
}
