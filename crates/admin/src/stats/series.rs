//! Chart series: labelled counts and order volume over time.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use shop_admin_core::{Order, Product};

use super::{Window, rounded_percent};

/// Windows shorter than this are bucketed by day instead of by month.
const DAY_BUCKET_SPAN_DAYS: i64 = 30;

/// Number of month buckets in the orders-over-time chart.
const MONTH_BUCKETS: u32 = 12;

/// Labelled values with each value's share of the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
    pub percentages: Vec<u32>,
}

impl ChartSeries {
    /// Build a series from `(label, value)` pairs, keeping their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, u64)>) -> Self {
        let (labels, data): (Vec<String>, Vec<u64>) = pairs.into_iter().unzip();
        let total: u64 = data.iter().sum();
        let percentages = data
            .iter()
            .map(|&value| rounded_percent(saturate(value), saturate(total)))
            .collect();
        Self {
            labels,
            data,
            percentages,
        }
    }
}

fn saturate(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Stock on hand per product, in product-list order. Not time-filtered.
#[must_use]
pub fn product_quantity(products: &[Product]) -> ChartSeries {
    ChartSeries::from_pairs(
        products
            .iter()
            .map(|p| (p.name.clone(), u64::from(p.quantity))),
    )
}

/// Whether day buckets without orders are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketPolicy {
    /// Every day in the window, zeros included.
    #[default]
    Dense,
    /// Only days with at least one order.
    Sparse,
}

impl FromStr for BucketPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            other => Err(format!("unknown bucket policy '{other}', expected dense or sparse")),
        }
    }
}

/// Size of the buckets in a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    /// Day buckets for windows shorter than 30 days, month buckets otherwise.
    #[must_use]
    pub fn for_window(window: &Window) -> Self {
        if window.span() < Duration::days(DAY_BUCKET_SPAN_DAYS) {
            Self::Day
        } else {
            Self::Month
        }
    }

    fn truncate(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }
}

/// One point of the orders-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDate,
    pub count: usize,
}

/// Order counts per day or per month, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    pub buckets: Vec<Bucket>,
}

impl TimeSeries {
    /// Bucket `orders` by creation date (UTC).
    ///
    /// Month buckets cover the twelve calendar months ending with the month
    /// of the window's last instant (`now` for the preset ranges, the end of
    /// a custom range) and are always dense. Day buckets run from the first
    /// to the last day of the window and follow `policy`.
    #[must_use]
    pub fn orders_over_time(orders: &[&Order], window: &Window, policy: BucketPolicy) -> Self {
        let granularity = Granularity::for_window(window);
        let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
        for at in orders.iter().filter_map(|o| o.created_at) {
            *counts.entry(granularity.truncate(at.date_naive())).or_default() += 1;
        }

        let days: Vec<NaiveDate> = match granularity {
            Granularity::Day => {
                let last = window.last_instant().date_naive();
                window
                    .start
                    .date_naive()
                    .iter_days()
                    .take_while(|day| *day <= last)
                    .collect()
            }
            Granularity::Month => month_starts(window.last_instant().date_naive()),
        };
        let keep_zeros = granularity == Granularity::Month || policy == BucketPolicy::Dense;

        let buckets = days
            .into_iter()
            .map(|start| Bucket {
                label: granularity.label(start),
                start,
                count: counts.get(&start).copied().unwrap_or(0),
            })
            .filter(|bucket| keep_zeros || bucket.count > 0)
            .collect();

        Self {
            granularity,
            buckets,
        }
    }

    /// Total orders across every bucket.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// First days of the twelve months ending with the month of `last`.
fn month_starts(last: NaiveDate) -> Vec<NaiveDate> {
    let this_month = Granularity::Month.truncate(last);
    (0..MONTH_BUCKETS)
        .rev()
        .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use shop_admin_core::OrderStatus;

    use super::*;
    use crate::stats::{ProductFilter, TimeRange};
    use crate::table::rows::fixtures::{order, product};

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, 12, 0, 0).unwrap()
    }

    fn week_orders() -> Vec<Order> {
        vec![
            order("o1", "p", OrderStatus::Pending, Some(at(6, 10))),
            order("o2", "p", OrderStatus::Pending, Some(at(6, 10))),
            order("o3", "p", OrderStatus::Pending, Some(at(6, 13))),
        ]
    }

    fn series(orders: &[Order], range: TimeRange, policy: BucketPolicy) -> TimeSeries {
        let window = Window::resolve(range, at(6, 15));
        let current = window.current_orders(orders, &ProductFilter::All);
        TimeSeries::orders_over_time(&current, &window, policy)
    }

    #[test]
    fn test_dense_day_buckets_include_zero_days() {
        let s = series(&week_orders(), TimeRange::Week, BucketPolicy::Dense);
        assert_eq!(s.granularity, Granularity::Day);
        let labels: Vec<&str> = s.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"2025-06-08"));
        assert_eq!(labels.last(), Some(&"2025-06-15"));
        assert_eq!(s.buckets.len(), 8);
        assert_eq!(s.total(), 3);
        assert!(s.buckets.iter().any(|b| b.count == 0));
    }

    #[test]
    fn test_sparse_day_buckets_skip_zero_days() {
        let s = series(&week_orders(), TimeRange::Week, BucketPolicy::Sparse);
        let flat: Vec<(&str, usize)> = s.buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();
        assert_eq!(flat, [("2025-06-10", 2), ("2025-06-13", 1)]);
    }

    #[test]
    fn test_month_buckets_are_dense_and_chronological() {
        let mut orders = week_orders();
        orders.push(order("o4", "p", OrderStatus::Pending, Some(at(5, 20))));
        let s = series(&orders, TimeRange::Month, BucketPolicy::Sparse);

        assert_eq!(s.granularity, Granularity::Month);
        assert_eq!(s.buckets.len(), 12);
        assert_eq!(s.buckets[0].label, "2024-07");
        assert_eq!(s.buckets[11].label, "2025-06");
        assert_eq!(s.buckets[10].count, 1);
        assert_eq!(s.buckets[11].count, 3);
        assert!(s.buckets.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_month_buckets_end_at_custom_range_end() {
        let old = |m, d| Utc.with_ymd_and_hms(2023, m, d, 12, 0, 0).unwrap();
        let orders = vec![
            order("o1", "p", OrderStatus::Pending, Some(old(2, 3))),
            order("o2", "p", OrderStatus::Pending, Some(old(4, 20))),
            order("o3", "p", OrderStatus::Pending, Some(old(5, 30))),
        ];
        let range = TimeRange::Custom {
            start: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        };
        let window = Window::resolve(range, at(6, 15));
        let current = window.current_orders(&orders, &ProductFilter::All);
        let s = TimeSeries::orders_over_time(&current, &window, BucketPolicy::Dense);

        assert_eq!(s.granularity, Granularity::Month);
        assert_eq!(s.buckets.len(), 12);
        assert_eq!(s.buckets[11].label, "2023-06");
        assert_eq!(s.buckets[0].label, "2022-07");
        assert_eq!(s.total(), 3);
        assert_eq!(s.buckets[9].count, 1);
    }

    #[test]
    fn test_missing_dates_give_zero_series() {
        let orders = vec![
            order("o1", "p", OrderStatus::Pending, None),
            order("o2", "p", OrderStatus::Completed, None),
        ];
        let s = series(&orders, TimeRange::Year, BucketPolicy::Dense);
        assert_eq!(s.total(), 0);
        assert!(s.buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_product_quantity_series() {
        let mut a = product("a", "A");
        a.quantity = 3;
        let mut b = product("b", "B");
        b.quantity = 1;
        let s = product_quantity(&[a, b]);
        assert_eq!(s.labels, ["A", "B"]);
        assert_eq!(s.data, [3, 1]);
        assert_eq!(s.percentages, [75, 25]);
        assert_eq!(product_quantity(&[]), ChartSeries::default());
    }

    #[test]
    fn test_bucket_policy_parses() {
        assert_eq!("Dense".parse::<BucketPolicy>(), Ok(BucketPolicy::Dense));
        assert_eq!("sparse".parse::<BucketPolicy>(), Ok(BucketPolicy::Sparse));
        assert!("weekly".parse::<BucketPolicy>().is_err());
    }
}
