//! Order table and order mutations.
//!
//! Listed rows carry the product name resolved from the cached products.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use shop_admin_core::{NewOrder, OrderId, OrderPatch};
use tracing::instrument;

use super::{Ack, ApiQuery, Created, ListParams, ListResponse, json_body};
use crate::error::AppError;
use crate::services;
use crate::state::AppState;
use crate::table::{OrderRow, OrderSearchField, OrderSortField, TableLayout, order_layout};

type OrderParams = ListParams<OrderSearchField, OrderSortField>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/layout", get(layout))
        .route("/api/orders/{id}", put(update).delete(remove))
}

/// One page of the order table. Rows depend on both collections, so either
/// collection's error is reported.
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<OrderParams>,
) -> Result<Json<ListResponse<OrderRow>>, AppError> {
    let mut table = params.table_state(state.config().default_page_size)?;
    let cache = state.cache().read().await;
    let rows = OrderRow::join(&cache.orders.items, &cache.products.items);
    Ok(Json(ListResponse {
        page: table.view_clamped(&rows),
        loading: cache.orders.loading || cache.products.loading,
        error: cache.error().map(str::to_string),
    }))
}

async fn layout() -> Json<TableLayout<OrderSearchField, OrderSortField>> {
    Json(order_layout())
}

#[instrument(skip(state, payload))]
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let draft = json_body(payload)?.validated()?;

    let id = services::add_order(state.store(), state.cache(), &draft).await?;
    tracing::info!(id = %id, product_id = %draft.product_id, "Order created");
    Ok((StatusCode::CREATED, Json(Created { id: id.into_inner() })))
}

#[instrument(skip(state, payload))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    payload: Result<Json<OrderPatch>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let patch = json_body(payload)?;
    ensure_cached(&state, &id).await?;
    let patch = patch.validated()?;

    services::update_order(state.store(), state.cache(), &id, &patch).await?;
    Ok(Json(Ack::OK))
}

#[instrument(skip(state))]
async fn remove(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Ack>, AppError> {
    ensure_cached(&state, &id).await?;
    services::delete_order(state.store(), state.cache(), &id).await?;
    tracing::info!(id = %id, "Order deleted");
    Ok(Json(Ack::OK))
}

async fn ensure_cached(state: &AppState, id: &OrderId) -> Result<(), AppError> {
    let cache = state.cache().read().await;
    if cache.orders.items.iter().any(|order| &order.id == id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("order {id}")))
    }
}
