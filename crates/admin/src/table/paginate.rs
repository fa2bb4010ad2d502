//! Page slicing.

use serde::{Deserialize, Serialize};

/// Number of rows per page, restricted to the sizes the table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Sizes offered by the page size picker.
    pub const OPTIONS: [usize; 5] = [5, 10, 20, 50, 100];

    /// Accept `size` if it is one of [`Self::OPTIONS`].
    #[must_use]
    pub fn new(size: usize) -> Option<Self> {
        Self::OPTIONS.contains(&size).then_some(Self(size))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size).ok_or_else(|| format!("page size must be one of {:?}", Self::OPTIONS))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// Slice out 1-indexed `page` of `items`.
///
/// Pages past the end (and page 0) are empty; the caller clamps.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, size: PageSize) -> &[T] {
    let Some(first) = page.checked_sub(1) else {
        return &[];
    };
    let start = first.saturating_mul(size.get());
    let end = start.saturating_add(size.get()).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed for `total` items.
#[must_use]
pub const fn total_pages(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.get())
}
