//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Health check
//! POST   /api/refresh             - Reload products and orders from the store
//!
//! # Products
//! GET    /api/products            - Filtered, sorted, paginated product table
//! GET    /api/products/layout     - Column and search field metadata
//! POST   /api/products            - Create product
//! PUT    /api/products/{id}       - Partially update product
//! DELETE /api/products/{id}       - Delete product
//!
//! # Orders
//! GET    /api/orders              - Order table joined with product names
//! GET    /api/orders/layout       - Column and search field metadata
//! POST   /api/orders              - Create order
//! PUT    /api/orders/{id}         - Partially update order
//! DELETE /api/orders/{id}         - Delete order
//!
//! # Statistics
//! GET    /api/stats               - Dashboard report
//! GET    /api/stats/export        - CSV or JSON download
//! ```
//!
//! Table endpoints accept `search`, `field`, `sort`, `dir`, `page` and
//! `per_page`; statistics endpoints accept `range`, `start`, `end` and
//! `product`.

pub mod orders;
pub mod products;
pub mod stats;

use axum::{
    Json, Router,
    extract::{
        FromRequestParts, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
    routing::get,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::AppError;
use crate::state::AppState;
use crate::table::{PageSize, SortConfig, SortDirection, TablePage, TableState};

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(products::router())
        .merge(orders::router())
        .merge(stats::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}

/// Query extractor that reports malformed parameters as [`AppError::BadRequest`].
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query: Result<Query<T>, QueryRejection> = Query::from_request_parts(parts, state).await;
        query
            .map(|Query(value)| Self(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// Unwrap a JSON body, reporting malformed input as [`AppError::BadRequest`].
///
/// # Errors
///
/// Returns `AppError::BadRequest` with the rejection text.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Table query parameters shared by the product and order listings.
#[derive(Debug, Deserialize)]
pub struct ListParams<S, O> {
    #[serde(default)]
    pub search: String,
    pub field: Option<S>,
    pub sort: Option<O>,
    pub dir: Option<SortDirection>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl<S, O> ListParams<S, O>
where
    S: Copy + PartialEq + Default,
    O: Copy + PartialEq,
{
    /// Table selections described by the parameters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for page 0 or an unsupported page size.
    pub fn table_state(&self, default_size: PageSize) -> Result<TableState<S, O>, AppError> {
        let size = match self.per_page {
            Some(n) => PageSize::new(n).ok_or_else(|| {
                AppError::BadRequest(format!("per_page must be one of {:?}", PageSize::OPTIONS))
            })?,
            None => default_size,
        };
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::BadRequest("page numbers start at 1".to_string()));
        }

        let mut state = TableState::new(self.field.unwrap_or_default(), size);
        state.set_search_term(self.search.trim());
        state.set_sort(self.sort.map(|field| SortConfig {
            field,
            direction: self.dir.unwrap_or_default(),
        }));
        state.go_to_page(page);
        Ok(state)
    }
}

/// A table page plus the collection's request status.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    #[serde(flatten)]
    pub page: TablePage<T>,
    pub loading: bool,
    /// Last store error for the collection, if any.
    pub error: Option<String>,
}

/// Body returned by create requests.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

/// Body returned by update and delete requests.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub const OK: Self = Self { success: true };
}
