//! Text handling.
//!
//! - **Normalizer**: canonical form for index keys and search queries
//! - **Haystack**: packed per-record search text for substring filtering

pub mod haystack;
pub mod normalizer;

pub use haystack::Haystacks;
pub use normalizer::{KeyNormalizer, NormalizerConfig};
