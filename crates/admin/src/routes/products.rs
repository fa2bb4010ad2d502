//! Product table and product mutations.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use shop_admin_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::instrument;

use super::{Ack, ApiQuery, Created, ListParams, ListResponse, json_body};
use crate::error::AppError;
use crate::services;
use crate::state::AppState;
use crate::table::{ProductSearchField, ProductSortField, TableLayout, product_layout};

type ProductParams = ListParams<ProductSearchField, ProductSortField>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/layout", get(layout))
        .route("/api/products/{id}", axum::routing::put(update).delete(remove))
}

/// One page of the product table.
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProductParams>,
) -> Result<Json<ListResponse<Product>>, AppError> {
    let mut table = params.table_state(state.config().default_page_size)?;
    let cache = state.cache().read().await;
    Ok(Json(ListResponse {
        page: table.view_clamped(&cache.products.items),
        loading: cache.products.loading,
        error: cache.products.error.clone(),
    }))
}

async fn layout() -> Json<TableLayout<ProductSearchField, ProductSortField>> {
    Json(product_layout())
}

#[instrument(skip(state, payload))]
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let id = services::add_product(state.store(), state.cache(), &draft).await?;
    tracing::info!(id = %id, "Product created");
    Ok((StatusCode::CREATED, Json(Created { id: id.into_inner() })))
}

#[instrument(skip(state, payload))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let patch = json_body(payload)?;
    ensure_cached(&state, &id).await?;
    patch.validate()?;

    services::update_product(state.store(), state.cache(), &id, &patch).await?;
    Ok(Json(Ack::OK))
}

#[instrument(skip(state))]
async fn remove(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Json<Ack>, AppError> {
    ensure_cached(&state, &id).await?;
    services::delete_product(state.store(), state.cache(), &id).await?;
    tracing::info!(id = %id, "Product deleted");
    Ok(Json(Ack::OK))
}

async fn ensure_cached(state: &AppState, id: &ProductId) -> Result<(), AppError> {
    let cache = state.cache().read().await;
    if cache.products.items.iter().any(|product| &product.id == id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}
