//! Business logic services for admin.
//!
//! # Services
//!
//! - `sync` - Store requests that keep the client cache up to date

pub mod sync;

pub use sync::{
    add_order, add_product, delete_order, delete_product, refresh_all, refresh_orders, refresh_products,
    update_order, update_product,
};
