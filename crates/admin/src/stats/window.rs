//! Time windows and product filters for the statistics dashboard.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shop_admin_core::{Order, ProductId};
use thiserror::Error;

/// Time range picked on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "range", rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
    /// Explicit window, both bounds exclusive.
    Custom {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Reasons a requested time range is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("unknown range '{0}', expected week, month, year or custom")]
    UnknownRange(String),
    #[error("invalid {0} date '{1}', expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(&'static str, String),
    #[error("custom range needs both start and end")]
    MissingBound,
    #[error("custom range start must be before its end")]
    Inverted,
}

impl TimeRange {
    /// Build a range from its name and, for `custom`, its bounds.
    ///
    /// Bounds are RFC 3339 instants or plain dates, which mean midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns `RangeError` for unknown names, unparsable dates, a custom
    /// range with a missing bound, or a start that is not before the end.
    pub fn parse(name: Option<&str>, start: Option<&str>, end: Option<&str>) -> Result<Self, RangeError> {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            None | Some("" | "month") => Ok(Self::Month),
            Some("week") => Ok(Self::Week),
            Some("year") => Ok(Self::Year),
            Some("custom") => {
                let (Some(start), Some(end)) = (start, end) else {
                    return Err(RangeError::MissingBound);
                };
                let start = parse_instant(start).ok_or_else(|| RangeError::InvalidDate("start", start.to_string()))?;
                let end = parse_instant(end).ok_or_else(|| RangeError::InvalidDate("end", end.to_string()))?;
                if start >= end {
                    return Err(RangeError::Inverted);
                }
                Ok(Self::Custom { start, end })
            }
            Some(other) => Err(RangeError::UnknownRange(other.to_string())),
        }
    }
}

/// Parse an RFC 3339 instant or a `YYYY-MM-DD` date at midnight UTC.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
}

/// Restriction of the statistics to a single product.
///
/// Serialized as the selector value: `"all"` or the product id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductFilter {
    #[default]
    All,
    Product(ProductId),
}

impl ProductFilter {
    /// Sentinel value selecting every product.
    pub const ALL: &'static str = "all";

    /// Parse a selector value; blank or `all` selects every product.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | Self::ALL) => Self::All,
            Some(id) => Self::Product(ProductId::new(id)),
        }
    }

    /// Whether `order` passes the filter.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Product(id) => &order.product_id == id,
        }
    }
}

impl From<String> for ProductFilter {
    fn from(value: String) -> Self {
        Self::from_param(Some(&value))
    }
}

impl From<ProductFilter> for String {
    fn from(filter: ProductFilter) -> Self {
        match filter {
            ProductFilter::All => ProductFilter::ALL.to_string(),
            ProductFilter::Product(id) => id.as_str().to_string(),
        }
    }
}

/// Current and previous period of a [`TimeRange`] resolved against a
/// reference instant.
///
/// The current period is `(start, end)`, with no upper bound for the
/// preset ranges. The previous period has the same length and ends where the
/// current one starts: `(previous_start, start]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub previous_start: DateTime<Utc>,
    /// Instant the window was resolved at.
    pub now: DateTime<Utc>,
}

impl Window {
    /// Resolve `range` relative to `now`.
    #[must_use]
    pub fn resolve(range: TimeRange, now: DateTime<Utc>) -> Self {
        let (start, end, previous_start) = match range {
            TimeRange::Week => {
                let week = Duration::days(7);
                (now - week, None, now - week - week)
            }
            TimeRange::Month => {
                let start = sub_months(now, 1);
                (start, None, sub_months(start, 1))
            }
            TimeRange::Year => {
                let start = sub_months(now, 12);
                (start, None, sub_months(start, 12))
            }
            TimeRange::Custom { start, end } => (start, Some(end), start - (end - start)),
        };
        Self {
            start,
            end,
            previous_start,
            now,
        }
    }

    /// Last instant the window covers: the custom end, or `now`.
    #[must_use]
    pub fn last_instant(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.now)
    }

    /// Length of the current period.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.last_instant() - self.start
    }

    /// Whether `at` falls strictly inside the current period.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at > self.start && self.end.is_none_or(|end| at < end)
    }

    /// Whether `at` falls inside the previous period.
    #[must_use]
    pub fn contains_previous(&self, at: DateTime<Utc>) -> bool {
        at > self.previous_start && at <= self.start
    }

    /// Orders in the current period passing `filter`. Orders without a
    /// creation time are never included.
    pub fn current_orders<'a>(&self, orders: &'a [Order], filter: &ProductFilter) -> Vec<&'a Order> {
        select(orders, filter, |at| self.contains(at))
    }

    /// Orders in the previous period passing `filter`.
    pub fn previous_orders<'a>(&self, orders: &'a [Order], filter: &ProductFilter) -> Vec<&'a Order> {
        select(orders, filter, |at| self.contains_previous(at))
    }
}

fn select<'a>(
    orders: &'a [Order],
    filter: &ProductFilter,
    in_period: impl Fn(DateTime<Utc>) -> bool,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| order.created_at.is_some_and(&in_period) && filter.matches(order))
        .collect()
}

/// Calendar month subtraction, clamping to the end of shorter months.
fn sub_months(at: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    at.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
