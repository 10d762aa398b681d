//! In-memory filtering engine for creature statblocks.
//!
//! Build [`Indexes`] once per dataset, then answer any combination of
//! multi-select, range, boolean and free-text predicates without touching the
//! full dataset more than once per query. Most callers want the [`Bestiary`]
//! facade, which owns the records alongside their indexes.
//!
//! ```
//! use bestiary_core::{Bestiary, SortDirection, SortField};
//! use bestiary_types::{catalog::keys, Creature, FilterState};
//!
//! let bestiary = Bestiary::new(vec![
//!     Creature {
//!         id: "imp".into(),
//!         name: "Imp".into(),
//!         creature_type: Some("outsider".into()),
//!         challenge_rating: Some(2.0),
//!         ..Default::default()
//!     },
//!     Creature {
//!         id: "rat".into(),
//!         name: "Dire Rat".into(),
//!         creature_type: Some("animal".into()),
//!         challenge_rating: Some(1.0 / 3.0),
//!         ..Default::default()
//!     },
//! ]);
//!
//! let mut state = FilterState::new();
//! state.set_max(keys::CR, Some(1.0));
//! let hits = bestiary.sorted(&state, SortField::Name, SortDirection::Ascending);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Dire Rat");
//! ```

pub mod analyzer;
pub mod index;
pub mod loader;
pub mod order;

pub use index::{
    build_indexes, Bestiary, FacetOrder, FacetTable, FacetValue, IndexStats, Indexes,
    PredictedChange,
};
pub use loader::{load_creatures, parse_creatures, read_creatures, LoadError};
pub use order::{compare, page_count, paginate, sort, sort_ids, SortDirection, SortField};
