//! Indexing and query infrastructure for the filtering engine.
//!
//! Built once per dataset, read-only afterwards:
//! - Multi-select attributes map normalized value → ascending id list
//! - Indexed numeric attributes are sorted `(value, ids)` arrays, queried by
//!   two binary searches
//! - Boolean flags store only the ids that have the flag; "does not have" is
//!   the complement, computed at query time
//!
//! Evaluation intersects the per-predicate id lists smallest-first, then
//! applies residual ranges and free-text search over the reduced set.
//!
//! Threading:
//! - [`Indexes`] and [`Bestiary`] hold no interior mutability and are
//!   `Send + Sync`. Reload takes `&mut self`, so no reader can observe a
//!   half-built index.

mod api;
mod builder;
mod evaluate;
mod facets;
mod predict;
mod sets;
mod stats;
mod types;

pub use api::Bestiary;
pub use builder::build_indexes;
pub use facets::{FacetOrder, FacetTable, FacetValue};
pub use predict::PredictedChange;
pub use stats::IndexStats;
pub use types::{Indexes, RangeEntry, RangeIndex, Slot, ValueEntry, ValueIndex};
