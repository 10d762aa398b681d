//! Core types for the Bestiary filtering engine.
//!
//! This crate holds the vocabulary shared by the engine and its callers:
//!
//! - **Records**: [`Creature`] and its nested statblock structures
//! - **Catalog**: the closed, typed table of [`FilterDefinition`]s
//! - **State**: the mutable [`FilterState`] a UI builds from user input
//!
//! Keeping these separate from the engine lets a UI layer construct and
//! serialize filter state without depending on index internals.

#![warn(missing_docs)]

pub mod catalog;
pub mod creature;
pub mod state;

pub use catalog::{
    Accessor, FilterCatalog, FilterCategory, FilterDefinition, FilterKind, FlagField,
    IndexStrategy, ListField, NumberField, RangeHint, TextField,
};
pub use creature::{
    format_challenge_rating, parse_challenge_rating, AbilityScores, Attacks, Creature,
    DamageReduction, HitPoints, Resistance, Size, SpecialAbility, Source, Speeds,
};
pub use state::{FilterState, MatchMode, RangeBound, StateError};

use serde::{Deserialize, Serialize};

/// Dense record identifier.
///
/// A record's id is its position in the dataset handed to the index builder.
/// Index postings store these instead of references so that indexes carry no
/// lifetimes and can be swapped wholesale on reload.
pub type RecordId = u32;

/// Engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of records per page when paginating. Default: 24
    pub page_size: usize,
    /// Whether free-text search also scans short and long descriptions.
    pub search_descriptions: bool,
    /// Whether free-text search also scans special ability names.
    pub search_abilities: bool,
    /// Whether index keys and search text fold Latin diacritics ("é" → "e").
    pub fold_diacritics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 24,
            search_descriptions: true,
            search_abilities: true,
            fold_diacritics: false,
        }
    }
}

impl EngineConfig {
    /// Restricts free-text search to creature names.
    pub const fn names_only() -> Self {
        Self {
            page_size: 24,
            search_descriptions: false,
            search_abilities: false,
            fold_diacritics: false,
        }
    }

    /// Folds diacritics so that "Dhampir" matches "Dhàmpir".
    pub const fn folded() -> Self {
        Self {
            page_size: 24,
            search_descriptions: true,
            search_abilities: true,
            fold_diacritics: true,
        }
    }
}
