//! Shop admin engine.
//!
//! Keeps a cached snapshot of the record store's products and orders and
//! derives everything the dashboard shows from it:
//!
//! - [`table`]: filter, sort and paginate for the product and order tables
//! - [`stats`]: time windows, summary metrics, charts and rankings
//! - [`export`]: CSV and JSON downloads of the statistics window
//!
//! [`store`] talks to the record store over HTTP and [`services`] keeps the
//! [`cache`] in step with every request. [`routes`] exposes the engine as a
//! JSON API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod routes;
pub mod services;
pub mod state;
pub mod stats;
pub mod store;
pub mod table;
