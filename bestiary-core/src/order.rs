//! Sorting and pagination.
//!
//! Sorting is stable: records comparing equal keep their input order in both
//! directions. Pages are 1-based.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use bestiary_types::{Creature, RecordId, Size};

/// Sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Name, case-insensitive first.
    #[default]
    Name,
    /// Numeric challenge rating, absent lowest.
    ChallengeRating,
    /// Creature type, case-insensitive first.
    Type,
    /// Fine → Colossal, unknown sizes last.
    Size,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Challenge rating used for ordering; absent sorts as -1.
const MISSING_CR: f64 = -1.0;

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

fn size_rank(creature: &Creature) -> u8 {
    creature.size_class().map_or(Size::Colossal.ordinal() + 1, Size::ordinal)
}

/// Compares two records by `field`, ascending.
pub fn compare(a: &Creature, b: &Creature, field: SortField) -> Ordering {
    match field {
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::ChallengeRating => {
            let a = a.challenge_rating().unwrap_or(MISSING_CR);
            let b = b.challenge_rating().unwrap_or(MISSING_CR);
            a.total_cmp(&b)
        }
        SortField::Type => compare_text(
            a.creature_type.as_deref().unwrap_or(""),
            b.creature_type.as_deref().unwrap_or(""),
        ),
        SortField::Size => size_rank(a).cmp(&size_rank(b)),
    }
}

#[inline]
fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable in-place sort of record references.
pub fn sort(records: &mut [&Creature], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| directed(compare(a, b, field), direction));
}

/// Stable in-place sort of ids, looking each up in `records`.
///
/// # Panics
///
/// Panics if an id is out of range for `records`.
pub fn sort_ids(
    ids: &mut [RecordId],
    records: &[Creature],
    field: SortField,
    direction: SortDirection,
) {
    ids.sort_by(|&a, &b| {
        directed(
            compare(&records[a as usize], &records[b as usize], field),
            direction,
        )
    });
}

/// The `page`-th window of `page_size` items.
///
/// Page 0, a zero page size, or a page past the end yields an empty slice.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items.
#[inline]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
