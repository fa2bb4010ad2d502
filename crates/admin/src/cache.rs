//! In-memory copies of the store collections.
//!
//! Each collection changes only through [`CollectionState::apply`], which
//! takes the current state and one [`CacheEvent`]. Requests themselves live
//! in [`crate::services::sync`].

use serde::Serialize;
use shop_admin_core::{Order, Product, Record};

/// Something that happened to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent<T: Record> {
    FetchStarted,
    FetchSucceeded(Vec<T>),
    FetchFailed(String),
    MutationStarted,
    Added(T),
    Updated(T),
    Deleted(T::Id),
    MutationFailed(String),
}

/// Cached records plus request status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    /// A fetch or mutation is in flight.
    pub loading: bool,
    /// Message of the last failed request, cleared when the next one starts.
    pub error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Record> CollectionState<T> {
    /// Apply one event.
    ///
    /// Updates and deletes of ids that are not cached change nothing but the
    /// request status.
    pub fn apply(&mut self, event: CacheEvent<T>) {
        match event {
            CacheEvent::FetchStarted | CacheEvent::MutationStarted => {
                self.loading = true;
                self.error = None;
            }
            CacheEvent::FetchSucceeded(items) => {
                self.items = items;
                self.loading = false;
            }
            CacheEvent::FetchFailed(message) | CacheEvent::MutationFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            CacheEvent::Added(item) => {
                self.items.push(item);
                self.loading = false;
            }
            CacheEvent::Updated(item) => {
                if let Some(slot) = self.items.iter_mut().find(|existing| existing.id() == item.id()) {
                    *slot = item;
                }
                self.loading = false;
            }
            CacheEvent::Deleted(id) => {
                self.items.retain(|existing| existing.id() != &id);
                self.loading = false;
            }
        }
    }
}

/// Both cached collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientCache {
    pub products: CollectionState<Product>,
    pub orders: CollectionState<Order>,
}

impl ClientCache {
    /// First error message across both collections, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.products.error.as_deref().or(self.orders.error.as_deref())
    }
}
