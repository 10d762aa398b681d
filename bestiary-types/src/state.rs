//! Filter state: the mutable query a UI builds from user input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{FilterCatalog, FilterKind};

/// Errors reported by [`FilterState::validate`].
///
/// The engine never produces these; a malformed state simply evaluates to
/// whatever it evaluates to. Callers that want to reject bad input ahead of
/// evaluation use `validate`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    /// The key names no filter in the catalog.
    #[error("unknown filter key `{key}`")]
    UnknownKey {
        /// Offending key.
        key: String,
    },
    /// The key is used with the wrong kind of state.
    #[error("filter `{key}` is a {expected} filter, but {found} state was supplied")]
    KindMismatch {
        /// Offending key.
        key: String,
        /// Kind declared by the catalog.
        expected: FilterKind,
        /// Kind implied by where the state was stored.
        found: FilterKind,
    },
    /// `min` is greater than `max`.
    #[error("range `{key}` has min {min} greater than max {max}")]
    InvertedRange {
        /// Offending key.
        key: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A bound is NaN or infinite.
    #[error("range `{key}` has a non-finite bound")]
    NonFiniteBound {
        /// Offending key.
        key: String,
    },
}

/// Whether a record must carry any or all of the selected values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one selected value suffices.
    #[default]
    Any,
    /// Every selected value must be present.
    All,
}

/// An inclusive numeric bound, either side optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

impl RangeBound {
    /// Bound with both sides set.
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Bound with only a lower side.
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Bound with only an upper side.
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Returns `true` if either side is set.
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Returns `true` if `value` lies within the bound.
    ///
    /// A NaN bound matches nothing.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// The complete query for one evaluation.
///
/// Every map is keyed by filter key. Keys the catalog does not know are
/// ignored at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search box contents.
    pub search: String,
    /// Selected values per multi-select filter.
    pub selections: BTreeMap<String, Vec<String>>,
    /// Bounds per range filter.
    pub ranges: BTreeMap<String, RangeBound>,
    /// Required flag value per boolean filter. Absent means unset.
    pub flags: BTreeMap<String, bool>,
    /// Multi-select keys whose match is complemented.
    pub exclude_mode: BTreeMap<String, bool>,
    /// Any/all matching per multi-select key.
    pub filter_mode: BTreeMap<String, MatchMode>,
}

fn same_value(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl FilterState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search box contents.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Selected values for `key`.
    pub fn selected(&self, key: &str) -> &[String] {
        self.selections.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `value` is selected for `key`, ignoring case.
    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        self.selected(key).iter().any(|v| same_value(v, value))
    }

    /// Adds `value` to `key`'s selection if it is not already present.
    pub fn select(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if !self.is_selected(key, &value) {
            self.selections.entry(key.to_owned()).or_default().push(value);
        }
    }

    /// Removes `value` from `key`'s selection.
    pub fn deselect(&mut self, key: &str, value: &str) {
        if let Some(values) = self.selections.get_mut(key) {
            values.retain(|v| !same_value(v, value));
            if values.is_empty() {
                self.selections.remove(key);
            }
        }
    }

    /// Flips membership of `value` and returns whether it is now selected.
    pub fn toggle(&mut self, key: &str, value: &str) -> bool {
        self.toggle_by(key, value, same_value)
    }

    /// Like [`FilterState::toggle`], with `eq` deciding whether two values
    /// name the same option. Every selected value equal to `value` is removed.
    pub fn toggle_by<F>(&mut self, key: &str, value: &str, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        let present = self.selected(key).iter().any(|v| eq(v, value));
        if present {
            if let Some(values) = self.selections.get_mut(key) {
                values.retain(|v| !eq(v, value));
                if values.is_empty() {
                    self.selections.remove(key);
                }
            }
            false
        } else {
            self.selections
                .entry(key.to_owned())
                .or_default()
                .push(value.to_owned());
            true
        }
    }

    /// Bound for `key`, if one is stored.
    pub fn range(&self, key: &str) -> Option<RangeBound> {
        self.ranges.get(key).copied()
    }

    /// Stores a bound for `key`. An inactive bound clears it.
    pub fn set_range(&mut self, key: &str, bound: RangeBound) {
        if bound.is_active() {
            self.ranges.insert(key.to_owned(), bound);
        } else {
            self.ranges.remove(key);
        }
    }

    /// Sets only the lower side of `key`'s bound.
    pub fn set_min(&mut self, key: &str, min: Option<f64>) {
        let bound = RangeBound {
            min,
            ..self.range(key).unwrap_or_default()
        };
        self.set_range(key, bound);
    }

    /// Sets only the upper side of `key`'s bound.
    pub fn set_max(&mut self, key: &str, max: Option<f64>) {
        let bound = RangeBound {
            max,
            ..self.range(key).unwrap_or_default()
        };
        self.set_range(key, bound);
    }

    /// Removes `key`'s bound.
    pub fn clear_range(&mut self, key: &str) {
        self.ranges.remove(key);
    }

    /// Required flag value for `key`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// Sets or unsets a boolean filter.
    pub fn set_flag(&mut self, key: &str, value: Option<bool>) {
        match value {
            Some(v) => {
                self.flags.insert(key.to_owned(), v);
            }
            None => {
                self.flags.remove(key);
            }
        }
    }

    /// Returns `true` if `key` is in exclude mode.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.exclude_mode.get(key).copied().unwrap_or(false)
    }

    /// Turns exclude mode on or off for `key`.
    pub fn set_exclude(&mut self, key: &str, exclude: bool) {
        if exclude {
            self.exclude_mode.insert(key.to_owned(), true);
        } else {
            self.exclude_mode.remove(key);
        }
    }

    /// Any/all mode for `key`.
    pub fn match_mode(&self, key: &str) -> MatchMode {
        self.filter_mode.get(key).copied().unwrap_or_default()
    }

    /// Sets any/all mode for `key`.
    pub fn set_match_mode(&mut self, key: &str, mode: MatchMode) {
        match mode {
            MatchMode::Any => {
                self.filter_mode.remove(key);
            }
            MatchMode::All => {
                self.filter_mode.insert(key.to_owned(), mode);
            }
        }
    }

    /// Returns to the all-empty default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if no predicate is active and the search box is blank.
    ///
    /// Modifiers alone (exclude, all) do not make a state non-empty.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.selections.values().all(Vec::is_empty)
            && self.ranges.values().all(|b| !b.is_active())
            && self.flags.is_empty()
    }

    /// Number of active predicates known to `catalog`, plus one for a
    /// non-blank search box.
    pub fn active_filter_count(&self, catalog: &FilterCatalog) -> usize {
        let has_kind = |key: &str, kind: FilterKind| {
            catalog.get(key).is_some_and(|def| def.kind == kind)
        };

        let search = usize::from(!self.search.trim().is_empty());
        let selections = self
            .selections
            .iter()
            .filter(|(key, values)| !values.is_empty() && has_kind(key, FilterKind::MultiSelect))
            .count();
        let ranges = self
            .ranges
            .iter()
            .filter(|(key, bound)| bound.is_active() && has_kind(key, FilterKind::Range))
            .count();
        let flags = self
            .flags
            .keys()
            .filter(|key| has_kind(key, FilterKind::Boolean))
            .count();

        search + selections + ranges + flags
    }

    /// Checks every key against `catalog` and every bound for sanity.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in key order per map.
    pub fn validate(&self, catalog: &FilterCatalog) -> Result<(), StateError> {
        let check = |key: &str, found: FilterKind| -> Result<(), StateError> {
            let def = catalog.get(key).ok_or_else(|| StateError::UnknownKey {
                key: key.to_owned(),
            })?;
            if def.kind != found {
                return Err(StateError::KindMismatch {
                    key: key.to_owned(),
                    expected: def.kind,
                    found,
                });
            }
            Ok(())
        };

        for key in self.selections.keys() {
            check(key, FilterKind::MultiSelect)?;
        }
        for key in self.exclude_mode.keys().chain(self.filter_mode.keys()) {
            check(key, FilterKind::MultiSelect)?;
        }
        for key in self.flags.keys() {
            check(key, FilterKind::Boolean)?;
        }
        for (key, bound) in &self.ranges {
            check(key, FilterKind::Range)?;
            if bound.min.is_some_and(|v| !v.is_finite())
                || bound.max.is_some_and(|v| !v.is_finite())
            {
                return Err(StateError::NonFiniteBound { key: key.clone() });
            }
            if let (Some(min), Some(max)) = (bound.min, bound.max) {
                if min > max {
                    return Err(StateError::InvertedRange {
                        key: key.clone(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}
