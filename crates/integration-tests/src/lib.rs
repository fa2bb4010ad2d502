//! Integration tests for the shop admin API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the admin server against a record store
//! STORE_BASE_URL=http://localhost:5001/api cargo run -p shop-admin
//!
//! # Run the ignored tests against it
//! ADMIN_BASE_URL=http://localhost:3001 cargo test -p shop-admin-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_tables` - Product and order table queries and mutations
//! - `admin_stats` - Statistics report and export downloads

use reqwest::Client;

/// Base URL of the admin API, from `ADMIN_BASE_URL`.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client for the admin API.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// Absolute URL of `path` on the admin API.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", admin_base_url().trim_end_matches('/'))
}
