//! Headline counters and the order status breakdown.

use serde::Serialize;
use shop_admin_core::{Order, OrderStatus, Product};

use super::{Window, percent_change, rounded_percent};

/// A figure for the current period next to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric<T> {
    pub current: T,
    pub previous: T,
    /// Percent change from `previous` to `current`.
    pub change: f64,
}

impl Metric<usize> {
    // Counts stay far below f64's exact integer range
    #[allow(clippy::cast_precision_loss)]
    fn count(current: usize, previous: usize) -> Self {
        Self {
            current,
            previous,
            change: percent_change(current as f64, previous as f64),
        }
    }
}

impl Metric<f64> {
    fn rate(current: f64, previous: f64) -> Self {
        Self {
            current,
            previous,
            change: percent_change(current, previous),
        }
    }
}

/// Summary cards shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_products: Metric<usize>,
    pub total_orders: Metric<usize>,
    pub completed_orders: Metric<usize>,
    /// Completed orders as a percentage of all orders.
    pub conversion_rate: Metric<f64>,
}

impl Summary {
    /// Compute the summary from the orders already selected into the current
    /// and previous periods.
    #[must_use]
    pub fn compute(products: &[Product], window: &Window, current: &[&Order], previous: &[&Order]) -> Self {
        let existing_at_start = products
            .iter()
            .filter(|p| p.created_at.is_none_or(|at| at <= window.start))
            .count();
        let completed_now = completed(current);
        let completed_before = completed(previous);

        Self {
            total_products: Metric::count(products.len(), existing_at_start),
            total_orders: Metric::count(current.len(), previous.len()),
            completed_orders: Metric::count(completed_now, completed_before),
            conversion_rate: Metric::rate(
                conversion_rate(completed_now, current.len()),
                conversion_rate(completed_before, previous.len()),
            ),
        }
    }
}

fn completed(orders: &[&Order]) -> usize {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .count()
}

// Counts stay far below f64's exact integer range
#[allow(clippy::cast_precision_loss)]
fn conversion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Orders of one status in the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusShare {
    pub status: OrderStatus,
    pub count: usize,
    /// Share of the period's orders, rounded to a whole percent.
    pub percentage: u32,
}

/// Count per status, always listing every status in [`OrderStatus::ALL`]
/// order.
#[must_use]
pub fn status_distribution(orders: &[&Order]) -> Vec<StatusShare> {
    let total = orders.len();
    OrderStatus::ALL
        .iter()
        .map(|&status| {
            let count = orders.iter().filter(|o| o.status == status).count();
            StatusShare {
                status,
                count,
                percentage: rounded_percent(count, total),
            }
        })
        .collect()
}
