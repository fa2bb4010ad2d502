//! Filter/sort/paginate engine shared by the product and order tables.
//!
//! The engine is a set of pure functions over an in-memory snapshot:
//!
//! 1. [`filter`] keeps records whose chosen field contains the search term
//!    (case-insensitive).
//! 2. [`sort`] orders the survivors stably on a single field.
//! 3. [`paginate`] slices out the requested 1-indexed page.
//!
//! [`TableState`] holds the user's current selections and applies the reset
//! and toggle rules between them. Records take part through [`TableRecord`].

pub mod columns;
pub mod fields;
pub mod filter;
pub mod paginate;
pub mod rows;
pub mod sort;
pub mod state;

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub use columns::{SearchOption, TableColumn, TableLayout, order_layout, product_layout};
pub use fields::{OrderSearchField, OrderSortField, ProductSearchField, ProductSortField};
pub use filter::filter;
pub use paginate::{PageSize, paginate, total_pages};
pub use rows::{OrderRow, ProductNames};
pub use sort::{SortConfig, SortDirection, sort, stable_sort_by};
pub use state::{TablePage, TableState};

/// A value a record exposes for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey<'a> {
    /// Compared by code point, case-sensitive.
    Text(&'a str),
    Decimal(Decimal),
    Integer(i64),
    /// Compared by instant, never by string form.
    Instant(DateTime<Utc>),
    /// Absent value; compares equal to everything.
    Missing,
}

/// A record that can be shown in a table.
pub trait TableRecord {
    /// Fields the search box can target.
    type SearchField: Copy + PartialEq;
    /// Fields a column header can sort on.
    type SortField: Copy + PartialEq;

    /// String form of `field` used for searching, `None` when absent.
    fn search_text(&self, field: Self::SearchField) -> Option<Cow<'_, str>>;

    /// Value of `field` used for sorting.
    fn sort_key(&self, field: Self::SortField) -> SortKey<'_>;
}
