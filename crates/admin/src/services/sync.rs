//! Store requests that keep the client cache in step.
//!
//! Every function records a started event, awaits the store, then records
//! the outcome. Concurrent refreshes are not coordinated: whichever response
//! is applied last wins.
//!
//! Add and update reload the collection afterwards. When that reload fails
//! the accepted change is applied to the cache locally instead, so the cache
//! never lags behind a mutation the store confirmed.

use std::future::Future;

use chrono::Utc;
use shop_admin_core::{
    NewOrder, NewProduct, Order, OrderId, OrderPatch, Product, ProductId, ProductPatch, Record,
};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::cache::{CacheEvent, ClientCache, CollectionState};
use crate::store::{StoreClient, StoreError};

type Select<T> = fn(&mut ClientCache) -> &mut CollectionState<T>;

fn products(cache: &mut ClientCache) -> &mut CollectionState<Product> {
    &mut cache.products
}

fn orders(cache: &mut ClientCache) -> &mut CollectionState<Order> {
    &mut cache.orders
}

/// Record `started`, await `request`, and on failure record `failure` as
/// the collection's error. The caller records success.
async fn track<T, R>(
    cache: &RwLock<ClientCache>,
    select: Select<T>,
    started: CacheEvent<T>,
    failure: &str,
    request: impl Future<Output = Result<R, StoreError>>,
) -> Result<R, StoreError>
where
    T: Record,
{
    let fetching = matches!(started, CacheEvent::FetchStarted);
    select(&mut *cache.write().await).apply(started);

    let result = request.await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "{failure}");
        let event = if fetching {
            CacheEvent::FetchFailed(failure.to_string())
        } else {
            CacheEvent::MutationFailed(failure.to_string())
        };
        select(&mut *cache.write().await).apply(event);
    }
    result
}

/// Reload the product collection.
///
/// # Errors
///
/// Returns the store error after recording it in the cache.
#[instrument(skip_all)]
pub async fn refresh_products(store: &StoreClient, cache: &RwLock<ClientCache>) -> Result<(), StoreError> {
    let items = track(
        cache,
        products,
        CacheEvent::FetchStarted,
        "Failed to fetch products",
        store.fetch_products(),
    )
    .await?;
    tracing::info!(count = items.len(), "products refreshed");
    cache.write().await.products.apply(CacheEvent::FetchSucceeded(items));
    Ok(())
}

/// Reload the order collection.
///
/// # Errors
///
/// Returns the store error after recording it in the cache.
#[instrument(skip_all)]
pub async fn refresh_orders(store: &StoreClient, cache: &RwLock<ClientCache>) -> Result<(), StoreError> {
    let items = track(
        cache,
        orders,
        CacheEvent::FetchStarted,
        "Failed to fetch orders",
        store.fetch_orders(),
    )
    .await?;
    tracing::info!(count = items.len(), "orders refreshed");
    cache.write().await.orders.apply(CacheEvent::FetchSucceeded(items));
    Ok(())
}

/// Reload both collections concurrently.
///
/// # Errors
///
/// Returns the first store error; both collections are attempted either way.
pub async fn refresh_all(store: &StoreClient, cache: &RwLock<ClientCache>) -> Result<(), StoreError> {
    let (products, orders) = tokio::join!(refresh_products(store, cache), refresh_orders(store, cache));
    products.and(orders)
}

/// Create a product, then reload the collection to pick up store-assigned
/// fields.
///
/// # Errors
///
/// Returns the store error after recording it in the cache. A failed reload
/// after a successful create is not an error.
#[instrument(skip_all, fields(name = %draft.name))]
pub async fn add_product(
    store: &StoreClient,
    cache: &RwLock<ClientCache>,
    draft: &NewProduct,
) -> Result<ProductId, StoreError> {
    let id = track(
        cache,
        products,
        CacheEvent::MutationStarted,
        "Failed to add product",
        store.add_product(draft),
    )
    .await?;
    if refresh_products(store, cache).await.is_err() {
        let product = draft.clone().into_product(id.clone(), Utc::now());
        cache.write().await.products.apply(CacheEvent::Added(product));
    }
    Ok(id)
}

/// Update a product, then reload the collection.
///
/// # Errors
///
/// Returns the store error after recording it in the cache. A failed reload
/// after a successful mutation is not an error.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_product(
    store: &StoreClient,
    cache: &RwLock<ClientCache>,
    id: &ProductId,
    patch: &ProductPatch,
) -> Result<(), StoreError> {
    track(
        cache,
        products,
        CacheEvent::MutationStarted,
        "Failed to update product",
        store.update_product(id, patch),
    )
    .await?;
    if refresh_products(store, cache).await.is_err() {
        let mut cache = cache.write().await;
        if let Some(mut product) = cache.products.items.iter().find(|p| &p.id == id).cloned() {
            patch.apply_to(&mut product, Utc::now());
            cache.products.apply(CacheEvent::Updated(product));
        }
    }
    Ok(())
}

/// Delete a product and drop it from the cache.
///
/// # Errors
///
/// Returns the store error after recording it in the cache.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_product(store: &StoreClient, cache: &RwLock<ClientCache>, id: &ProductId) -> Result<(), StoreError> {
    track(
        cache,
        products,
        CacheEvent::MutationStarted,
        "Failed to delete product",
        store.delete_product(id),
    )
    .await?;
    cache.write().await.products.apply(CacheEvent::Deleted(id.clone()));
    Ok(())
}

/// Create an order, then reload the collection.
///
/// # Errors
///
/// Returns the store error after recording it in the cache. A failed reload
/// after a successful mutation is not an error.
#[instrument(skip_all, fields(product_id = %draft.product_id))]
pub async fn add_order(store: &StoreClient, cache: &RwLock<ClientCache>, draft: &NewOrder) -> Result<OrderId, StoreError> {
    let id = track(
        cache,
        orders,
        CacheEvent::MutationStarted,
        "Failed to add order",
        store.add_order(draft),
    )
    .await?;
    if refresh_orders(store, cache).await.is_err() {
        let order = draft.clone().into_order(id.clone(), Utc::now());
        cache.write().await.orders.apply(CacheEvent::Added(order));
    }
    Ok(id)
}

/// Update an order, then reload the collection.
///
/// # Errors
///
/// Returns the store error after recording it in the cache. A failed reload
/// after a successful mutation is not an error.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_order(
    store: &StoreClient,
    cache: &RwLock<ClientCache>,
    id: &OrderId,
    patch: &OrderPatch,
) -> Result<(), StoreError> {
    track(
        cache,
        orders,
        CacheEvent::MutationStarted,
        "Failed to update order",
        store.update_order(id, patch),
    )
    .await?;
    if refresh_orders(store, cache).await.is_err() {
        let mut cache = cache.write().await;
        if let Some(mut order) = cache.orders.items.iter().find(|o| &o.id == id).cloned() {
            patch.apply_to(&mut order, Utc::now());
            cache.orders.apply(CacheEvent::Updated(order));
        }
    }
    Ok(())
}

/// Delete an order and drop it from the cache.
///
/// # Errors
///
/// Returns the store error after recording it in the cache.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_order(store: &StoreClient, cache: &RwLock<ClientCache>, id: &OrderId) -> Result<(), StoreError> {
    track(
        cache,
        orders,
        CacheEvent::MutationStarted,
        "Failed to delete order",
        store.delete_order(id),
    )
    .await?;
    cache.write().await.orders.apply(CacheEvent::Deleted(id.clone()));
    Ok(())
}
