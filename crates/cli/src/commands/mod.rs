//! Subcommand implementations and their shared plumbing.

pub mod stats;
pub mod table;

use std::io::{self, Write};

use serde::de::DeserializeOwned;
use shop_admin::config::{ConfigError, StoreConfig};
use shop_admin::stats::RangeError;
use shop_admin::store::{StoreClient, StoreError};
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid time range: {0}")]
    Range(#[from] RangeError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Store client built from the environment.
///
/// # Errors
///
/// Returns `CliError::Config` when the store settings are missing or invalid.
pub fn connect() -> Result<StoreClient, CliError> {
    let config = StoreConfig::from_env()?;
    tracing::debug!(store = %config.base_url, "Connecting to store");
    Ok(StoreClient::new(&config)?)
}

/// Clap value parser accepting a value's wire name, such as `createdAt`.
pub fn wire_name<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown value '{raw}'"))
}

/// Write `rows` under `headers` in left-aligned columns.
pub fn write_table(out: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    write_row(out, &widths, &header)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &widths, &rule)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let line = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
