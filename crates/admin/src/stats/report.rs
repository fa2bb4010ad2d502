//! The complete dashboard report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shop_admin_core::{Order, Product};

use super::ranking::{ProductSales, RankedProduct, product_sales, top_products};
use super::series::{BucketPolicy, ChartSeries, TimeSeries, product_quantity};
use super::summary::{StatusShare, Summary, status_distribution};
use super::{ProductFilter, TOP_PRODUCTS, TimeRange, Window};

/// Filters selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    #[serde(flatten)]
    pub range: TimeRange,
    #[serde(default)]
    pub product: ProductFilter,
}

impl StatsQuery {
    /// Resolve the time range against `now`.
    #[must_use]
    pub fn window(&self, now: DateTime<Utc>) -> Window {
        Window::resolve(self.range, now)
    }

    /// Orders in the current period that pass the product filter.
    pub fn current_orders<'a>(&self, orders: &'a [Order], now: DateTime<Utc>) -> Vec<&'a Order> {
        self.window(now).current_orders(orders, &self.product)
    }
}

/// Everything the statistics dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub window: Window,
    pub summary: Summary,
    pub status_distribution: Vec<StatusShare>,
    pub product_sales: Vec<ProductSales>,
    pub product_quantity: ChartSeries,
    pub orders_over_time: TimeSeries,
    pub top_products: Vec<RankedProduct>,
}

impl StatsReport {
    /// Compute the report for `query` at `now`.
    #[must_use]
    pub fn compute(
        products: &[Product],
        orders: &[Order],
        query: &StatsQuery,
        now: DateTime<Utc>,
        policy: BucketPolicy,
    ) -> Self {
        let window = query.window(now);
        let current = window.current_orders(orders, &query.product);
        let previous = window.previous_orders(orders, &query.product);
        let sales = product_sales(products, &current);

        Self {
            summary: Summary::compute(products, &window, &current, &previous),
            status_distribution: status_distribution(&current),
            top_products: top_products(&sales, TOP_PRODUCTS),
            product_sales: sales,
            product_quantity: product_quantity(products),
            orders_over_time: TimeSeries::orders_over_time(&current, &window, policy),
            window,
        }
    }
}
