//! Shop Admin Core - Shared record types.
//!
//! This crate provides the record types used across the shop admin components:
//! - `admin` - Client cache, table engine, statistics engine and JSON API
//! - `cli` - Command-line access to the same tables and reports
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Record types, type-safe IDs, order status and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
