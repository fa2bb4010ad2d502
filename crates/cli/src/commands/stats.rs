//! `stats` subcommand.

use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};
use clap::{Args, ValueEnum};
use shop_admin::export::{ExportFormat, export};
use shop_admin::stats::{BucketPolicy, Metric, ProductFilter, StatsQuery, StatsReport, TimeRange};

use super::{CliError, connect};

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,
    /// The JSON export document
    Json,
    /// Orders in the window as CSV
    Csv,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Time range: week, month, year or custom
    #[arg(short, long, default_value = "month")]
    pub range: String,

    /// Start of a custom range (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// End of a custom range (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,

    /// Restrict to one product id, or `all`
    #[arg(short, long)]
    pub product: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Whether empty days appear in daily charts (`dense` or `sparse`)
    #[arg(long, env = "STATS_DAY_BUCKETS", default_value = "dense")]
    pub buckets: BucketPolicy,
}

impl StatsArgs {
    fn query(&self) -> Result<StatsQuery, CliError> {
        Ok(StatsQuery {
            range: TimeRange::parse(Some(&self.range), self.start.as_deref(), self.end.as_deref())?,
            product: ProductFilter::from_param(self.product.as_deref()),
        })
    }
}

/// Compute the report from a fresh snapshot of the store and print it.
///
/// # Errors
///
/// Returns `CliError` for an invalid range, an unreachable store or a failed
/// write.
pub async fn run(args: StatsArgs) -> Result<(), CliError> {
    let query = args.query()?;
    let store = connect()?;
    let (products, orders) = tokio::try_join!(store.fetch_products(), store.fetch_orders())?;
    let now = Utc::now();

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            let report = StatsReport::compute(&products, &orders, &query, now, args.buckets);
            write_report(&mut out, &report)?;
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let format = if args.format == OutputFormat::Csv {
                ExportFormat::Csv
            } else {
                ExportFormat::Json
            };
            let file = export(format, &products, &orders, &query, now, args.buckets)?;
            writeln!(out, "{}", file.body)?;
        }
    }
    Ok(())
}

fn write_report(out: &mut impl Write, report: &StatsReport) -> io::Result<()> {
    let window = &report.window;
    let end = window
        .end
        .map_or_else(|| "now".to_string(), |end| end.to_rfc3339_opts(SecondsFormat::Secs, true));
    writeln!(
        out,
        "Window: {} .. {end}",
        window.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;

    let summary = &report.summary;
    writeln!(out)?;
    write_count(out, "Products", &summary.total_products)?;
    write_count(out, "Orders", &summary.total_orders)?;
    write_count(out, "Completed", &summary.completed_orders)?;
    let rate = &summary.conversion_rate;
    writeln!(
        out,
        "{:<12}{:>7.1}%  (previous {:.1}%, {:+.1}%)",
        "Conversion", rate.current, rate.previous, rate.change
    )?;

    writeln!(out, "\nStatus")?;
    for share in &report.status_distribution {
        writeln!(out, "  {:<12}{:>5}  {:>3}%", share.status.as_str(), share.count, share.percentage)?;
    }

    writeln!(out, "\nTop products")?;
    if report.top_products.is_empty() {
        writeln!(out, "  none")?;
    }
    for ranked in &report.top_products {
        writeln!(out, "  {}. {} ({} orders)", ranked.rank, ranked.name, ranked.orders)?;
    }

    let series = &report.orders_over_time;
    writeln!(out, "\nOrders over time (by {})", series.granularity.as_str())?;
    for bucket in &series.buckets {
        writeln!(out, "  {:<12}{:>5}", bucket.label, bucket.count)?;
    }
    Ok(())
}

fn write_count(out: &mut impl Write, label: &str, metric: &Metric<usize>) -> io::Result<()> {
    writeln!(
        out,
        "{label:<12}{:>8}  (previous {}, {:+.1}%)",
        metric.current, metric.previous, metric.change
    )
}
