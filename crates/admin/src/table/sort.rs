//! Stable single-column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{SortKey, TableRecord};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The column a table is sorted on and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortConfig<F> {
    /// Ascending sort on `field`.
    #[must_use]
    pub const fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Next sort after the user selects `field`.
    ///
    /// Re-selecting the current field flips `asc` to `desc` and back; any
    /// other field starts ascending.
    #[must_use]
    pub fn request(current: Option<Self>, field: F) -> Self {
        match current {
            Some(cfg) if cfg.field == field && cfg.direction == SortDirection::Asc => Self {
                field,
                direction: SortDirection::Desc,
            },
            _ => Self::asc(field),
        }
    }
}

/// Compare two sort keys. A missing key on either side compares equal, as
/// do keys of different kinds.
#[must_use]
pub fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Decimal(a), SortKey::Decimal(b)) => a.cmp(b),
        (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
        (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Sort records in place on `config`, keeping ties in their prior order.
pub fn sort<R: TableRecord>(records: &mut [&R], config: SortConfig<R::SortField>) {
    stable_sort_by(records, |a, b| {
        let ordering = compare_keys(&a.sort_key(config.field), &b.sort_key(config.field));
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Bottom-up merge sort that is stable under any comparator.
///
/// Missing values make the comparator non-transitive, which the standard
/// library sorts are allowed to panic on.
pub fn stable_sort_by<T: Copy>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buf = items.to_vec();
    let mut width = 1;
    while width < len {
        let run = width.saturating_mul(2);
        for (src, dst) in items.chunks(run).zip(buf.chunks_mut(run)) {
            let (left, right) = src.split_at(width.min(src.len()));
            merge(left, right, dst, &mut compare);
        }
        items.copy_from_slice(&buf);
        width = run;
    }
}

fn merge<T: Copy>(left: &[T], right: &[T], out: &mut [T], compare: &mut impl FnMut(&T, &T) -> Ordering) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Right side only wins when strictly smaller, so ties keep left first.
        let next = match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) if compare(r, l) == Ordering::Less => {
                j += 1;
                *r
            }
            (Some(l), _) => {
                i += 1;
                *l
            }
            (None, Some(r)) => {
                j += 1;
                *r
            }
            (None, None) => break,
        };
        *slot = next;
    }
}
