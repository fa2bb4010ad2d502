//! Downloadable exports of the statistics window.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use shop_admin_core::{Order, Product};

use crate::stats::{BucketPolicy, StatsQuery, StatsReport};
use crate::table::ProductNames;

/// Column headers of the orders CSV.
pub const CSV_HEADER: &str = "id,product,customer,status,date";

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// Download name, stamped with the UTC date of `now`.
    #[must_use]
    pub fn file_name(self, now: DateTime<Utc>) -> String {
        let date = now.format("%Y-%m-%d");
        match self {
            Self::Json => format!("stats-export-{date}.json"),
            Self::Csv => format!("orders-export-{date}.csv"),
        }
    }
}

/// A rendered export ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub body: String,
}

/// JSON export document.
#[derive(Debug, Serialize)]
pub struct StatsExport<'a> {
    pub products: &'a [Product],
    /// Orders in the current window after the product filter.
    pub orders: Vec<&'a Order>,
    pub stats: StatsReport,
    pub filters: &'a StatsQuery,
}

/// Render the statistics window in `format`.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the JSON document cannot be encoded.
pub fn export(
    format: ExportFormat,
    products: &[Product],
    orders: &[Order],
    query: &StatsQuery,
    now: DateTime<Utc>,
    policy: BucketPolicy,
) -> Result<ExportFile, serde_json::Error> {
    let window_orders = query.current_orders(orders, now);
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&StatsExport {
            products,
            orders: window_orders,
            stats: StatsReport::compute(products, orders, query, now, policy),
            filters: query,
        })?,
        ExportFormat::Csv => orders_csv(products, &window_orders),
    };

    Ok(ExportFile {
        format,
        file_name: format.file_name(now),
        body,
    })
}

/// One CSV row per order. Every field is quoted; unknown products get the
/// unknown-product label and a missing date is left empty.
#[must_use]
pub fn orders_csv(products: &[Product], orders: &[&Order]) -> String {
    let names = ProductNames::new(products);
    let mut csv = String::from(CSV_HEADER);
    for order in orders {
        let date = order
            .created_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();
        let _ = write!(
            csv,
            "\n{},{},{},{},{}",
            quote(order.id.as_str()),
            quote(names.resolve(&order.product_id)),
            quote(&order.customer_name),
            quote(order.status.as_str()),
            quote(&date),
        );
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
