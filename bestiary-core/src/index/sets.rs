//! Set algebra over ascending, duplicate-free id lists.

use bestiary_types::RecordId;

/// Appends the sorted union of `a` and `b` to `out`.
pub(crate) fn merge_sorted_dedup(a: &[RecordId], b: &[RecordId], out: &mut Vec<RecordId>) {
    let mut ai = 0usize;
    let mut bi = 0usize;

    while ai < a.len() && bi < b.len() {
        match a[ai].cmp(&b[bi]) {
            std::cmp::Ordering::Less => {
                out.push(a[ai]);
                ai += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[bi]);
                bi += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[ai]);
                ai += 1;
                bi += 1;
            }
        }
    }

    out.extend_from_slice(&a[ai..]);
    out.extend_from_slice(&b[bi..]);
}

/// Union of any number of lists.
pub(crate) fn union_all<'a, I>(lists: I) -> Vec<RecordId>
where
    I: IntoIterator<Item = &'a [RecordId]>,
{
    let mut acc: Vec<RecordId> = Vec::new();
    let mut scratch: Vec<RecordId> = Vec::new();
    for list in lists {
        if list.is_empty() {
            continue;
        }
        if acc.is_empty() {
            acc.extend_from_slice(list);
            continue;
        }
        scratch.clear();
        scratch.reserve(acc.len() + list.len());
        merge_sorted_dedup(&acc, list, &mut scratch);
        std::mem::swap(&mut acc, &mut scratch);
    }
    acc
}

/// Keeps only the ids of `candidates` also present in `postings`.
#[inline]
pub(crate) fn hard_intersect(candidates: &mut Vec<RecordId>, postings: &[RecordId]) {
    let mut write_idx = 0usize;
    let mut posting_idx = 0usize;

    for read_idx in 0..candidates.len() {
        let id = candidates[read_idx];

        while posting_idx < postings.len() && postings[posting_idx] < id {
            posting_idx += 1;
        }

        if posting_idx < postings.len() && postings[posting_idx] == id {
            candidates[write_idx] = id;
            write_idx += 1;
            posting_idx += 1;
        }
    }

    candidates.truncate(write_idx);
}

/// Intersection of all `sets`, walking the smallest first.
///
/// Returns `None` when `sets` is empty, meaning "no constraint".
pub(crate) fn intersect_all(sets: &mut [&[RecordId]]) -> Option<Vec<RecordId>> {
    sets.sort_unstable_by_key(|s| s.len());
    let (first, rest) = sets.split_first()?;
    let mut acc = first.to_vec();
    for set in rest {
        if acc.is_empty() {
            break;
        }
        hard_intersect(&mut acc, set);
    }
    Some(acc)
}

/// Ids in `0..len` not present in `set`.
pub(crate) fn complement(set: &[RecordId], len: usize) -> Vec<RecordId> {
    let mut out = Vec::with_capacity(len.saturating_sub(set.len()));
    let mut si = 0usize;
    for id in 0..len as RecordId {
        if si < set.len() && set[si] == id {
            si += 1;
        } else {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_and_dedups() {
        let a: &[RecordId] = &[1, 3, 5];
        let b: &[RecordId] = &[2, 3, 8];
        let c: &[RecordId] = &[];
        assert_eq!(union_all([a, b, c]), vec![1, 2, 3, 5, 8]);
        assert!(union_all(std::iter::empty::<&[RecordId]>()).is_empty());
    }

    #[test]
    fn intersect_walks_all_sets() {
        let a: &[RecordId] = &[0, 1, 2, 3, 4, 5];
        let b: &[RecordId] = &[1, 3, 5];
        let c: &[RecordId] = &[3, 5, 7];
        let mut sets = [a, b, c];
        assert_eq!(intersect_all(&mut sets), Some(vec![3, 5]));
    }

    #[test]
    fn intersect_of_nothing_is_unconstrained() {
        assert_eq!(intersect_all(&mut []), None);
    }

    #[test]
    fn intersect_with_empty_is_empty() {
        let a: &[RecordId] = &[0, 1];
        let b: &[RecordId] = &[];
        assert_eq!(intersect_all(&mut [a, b]), Some(vec![]));
    }

    #[test]
    fn complement_covers_the_rest() {
        assert_eq!(complement(&[0, 2, 3], 5), vec![1, 4]);
        assert_eq!(complement(&[], 3), vec![0, 1, 2]);
        assert!(complement(&[0, 1], 2).is_empty());
    }
}
