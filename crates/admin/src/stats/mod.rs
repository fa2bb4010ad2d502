//! Dashboard statistics computed from product and order snapshots.
//!
//! Everything here is synchronous and pure: callers pass the snapshots and
//! the reference instant, and get a fresh [`StatsReport`] back. Malformed
//! records never fail a computation. Orders without a creation time are left
//! out of every time-bounded figure, and unknown product references resolve
//! to the unknown-product label.

pub mod ranking;
pub mod report;
pub mod series;
pub mod summary;
pub mod window;

pub use ranking::{ProductSales, RankedProduct, product_sales, top_products};
pub use report::{StatsQuery, StatsReport};
pub use series::{Bucket, BucketPolicy, ChartSeries, Granularity, TimeSeries, product_quantity};
pub use summary::{Metric, StatusShare, Summary, status_distribution};
pub use window::{ProductFilter, RangeError, TimeRange, Window, parse_instant};

/// Number of products in the top-products ranking.
pub const TOP_PRODUCTS: usize = 5;

/// Percent change from `previous` to `current`.
///
/// A rise from zero counts as 100%, and zero to zero as no change.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 { 0.0 } else { 100.0 }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Share of `total` taken by `count`, rounded to a whole percent.
#[must_use]
// Order counts stay far below f64's exact integer range (2^52)
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rounded_percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
