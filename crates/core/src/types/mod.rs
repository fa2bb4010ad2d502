//! Core types for the shop admin.
//!
//! This module provides the two record types mirrored from the record store
//! together with type-safe wrappers for their identifiers and fields.

pub mod email;
pub mod id;
pub mod order;
pub mod product;
pub mod status;
pub mod timestamp;
pub mod validation;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{NewOrder, Order, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch};
pub use status::*;
pub use validation::ValidationError;

/// Label used wherever an order references a product that is not in the
/// product list.
pub const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Common behaviour of records held in the client cache.
pub trait Record {
    /// Identifier type of the record.
    type Id: PartialEq + Clone + std::fmt::Debug;

    /// Returns the record's identifier.
    fn id(&self) -> &Self::Id;
}
