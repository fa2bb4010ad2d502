//! Shop admin CLI - the admin tables and statistics in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Products whose name contains "lamp", most expensive first
//! shop-admin-cli products --search lamp --sort price --dir desc
//!
//! # Second page of orders for one customer email
//! shop-admin-cli orders --field customerEmail --search ada@ --page 2
//!
//! # Last week's statistics for a single product, as JSON
//! shop-admin-cli stats --range week --product p1 --format json
//!
//! # Orders in a custom window as CSV
//! shop-admin-cli stats --range custom --start 2025-01-01 --end 2025-02-01 --format csv
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_BASE_URL` - Record store API root (required)
//! - `STORE_API_KEY` - Bearer token for the store (optional)
//! - `STORE_TIMEOUT_SECS` - Request timeout, default 30
//! - `STATS_DAY_BUCKETS` - Default for `stats --buckets` (`dense` or `sparse`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-admin-cli")]
#[command(author, version, about = "Shop admin tables and statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a page of the product table
    Products(commands::table::ProductArgs),
    /// Print a page of the order table
    Orders(commands::table::OrderArgs),
    /// Print the statistics report or export it
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output can be piped
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shop_admin=warn,shop_admin_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Before parsing so `.env` values reach env-backed arguments
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Products(args) => commands::table::products(args).await,
        Commands::Orders(args) => commands::table::orders(args).await,
        Commands::Stats(args) => commands::stats::run(args).await,
    }
}
