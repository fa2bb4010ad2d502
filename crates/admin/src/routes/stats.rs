//! Statistics dashboard, export downloads and cache refresh.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiQuery;
use crate::error::AppError;
use crate::export::{ExportFormat, export};
use crate::services;
use crate::state::AppState;
use crate::stats::{ProductFilter, StatsQuery, StatsReport, TimeRange};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(report))
        .route("/api/stats/export", get(download))
        .route("/api/refresh", post(refresh))
}

/// Dashboard filters as they arrive on the query string.
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub product: Option<String>,
    #[serde(default)]
    pub format: ExportFormat,
}

impl StatsParams {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown or malformed range.
    pub fn query(&self) -> Result<StatsQuery, AppError> {
        let range = TimeRange::parse(self.range.as_deref(), self.start.as_deref(), self.end.as_deref())
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(StatsQuery {
            range,
            product: ProductFilter::from_param(self.product.as_deref()),
        })
    }
}

/// A stats report plus the cache state it was computed from.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub report: StatsReport,
    pub loading: bool,
    pub error: Option<String>,
}

#[instrument(skip(state))]
async fn report(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StatsParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let query = params.query()?;
    let cache = state.cache().read().await;
    let report = StatsReport::compute(
        &cache.products.items,
        &cache.orders.items,
        &query,
        Utc::now(),
        state.config().day_buckets,
    );
    Ok(Json(StatsResponse {
        report,
        loading: cache.products.loading || cache.orders.loading,
        error: cache.error().map(str::to_string),
    }))
}

#[instrument(skip(state))]
async fn download(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StatsParams>,
) -> Result<Response, AppError> {
    let query = params.query()?;
    let file = {
        let cache = state.cache().read().await;
        export(
            params.format,
            &cache.products.items,
            &cache.orders.items,
            &query,
            Utc::now(),
            state.config().day_buckets,
        )
        .map_err(|e| AppError::Internal(format!("Failed to encode export: {e}")))?
    };

    tracing::info!(file_name = %file.file_name, "Export generated");
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, file.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

/// Collection sizes after a refresh.
#[derive(Debug, Serialize)]
pub struct Refreshed {
    pub products: usize,
    pub orders: usize,
}

#[instrument(skip(state))]
async fn refresh(State(state): State<AppState>) -> Result<Json<Refreshed>, AppError> {
    services::refresh_all(state.store(), state.cache()).await?;
    let cache = state.cache().read().await;
    Ok(Json(Refreshed {
        products: cache.products.items.len(),
        orders: cache.orders.items.len(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use chrono::Duration;
    use shop_admin_core::{Order, OrderStatus};
    use tower::ServiceExt;

    use super::super::routes;
    use super::super::test_support::{get, send, state_with};
    use super::*;
    use crate::cache::CacheEvent;
    use crate::export::CSV_HEADER;
    use crate::table::rows::fixtures::{order, product};

    fn recent_orders() -> Vec<Order> {
        let now = Utc::now();
        vec![
            order("o1", "p1", OrderStatus::Completed, Some(now - Duration::days(1))),
            order("o2", "p1", OrderStatus::Pending, Some(now - Duration::days(2))),
            order("o3", "p2", OrderStatus::Completed, Some(now - Duration::days(3))),
            order("o4", "p2", OrderStatus::Completed, Some(now - Duration::days(400))),
        ]
    }

    #[test]
    fn test_params_to_query() {
        let params = StatsParams {
            range: Some("custom".to_string()),
            start: Some("2025-01-01".to_string()),
            end: Some("2025-02-01".to_string()),
            product: Some("p1".to_string()),
            ..StatsParams::default()
        };
        let query = params.query().unwrap();
        assert!(matches!(query.range, TimeRange::Custom { .. }));
        assert_eq!(query.product, ProductFilter::from_param(Some("p1")));

        let bad = StatsParams {
            range: Some("custom".to_string()),
            ..StatsParams::default()
        };
        assert!(matches!(bad.query(), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_report_for_week() {
        let state = state_with(vec![product("p1", "Lamp"), product("p2", "Chair")], recent_orders());
        let (status, body) = send(state, get("/api/stats?range=week")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["totalOrders"]["current"], 3);
        assert_eq!(body["summary"]["completedOrders"]["current"], 2);
        assert_eq!(body["topProducts"][0]["name"], "Lamp");
        assert_eq!(body["ordersOverTime"]["granularity"], "day");
        assert_eq!(body["loading"], false);
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_report_surfaces_cache_error() {
        let state = state_with(vec![product("p1", "Lamp")], recent_orders());
        state
            .cache()
            .write()
            .await
            .orders
            .apply(CacheEvent::FetchFailed("Failed to fetch orders".to_string()));

        let (status, body) = send(state, get("/api/stats?range=week")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Failed to fetch orders");
        assert_eq!(body["summary"]["totalOrders"]["current"], 3);
    }

    #[tokio::test]
    async fn test_report_filters_by_product() {
        let state = state_with(vec![product("p1", "Lamp"), product("p2", "Chair")], recent_orders());
        let (_, body) = send(state, get("/api/stats?range=year&product=p2")).await;
        assert_eq!(body["summary"]["totalOrders"]["current"], 1);
    }

    #[tokio::test]
    async fn test_report_rejects_unknown_range() {
        let (status, body) = send(state_with(vec![], vec![]), get("/api/stats?range=decade")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("decade"));
    }

    #[tokio::test]
    async fn test_csv_export_download() {
        let state = state_with(vec![product("p1", "Lamp")], recent_orders());
        let response = routes()
            .with_state(state)
            .oneshot(get("/api/stats/export?format=csv&range=week&product=p1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"orders-export-"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.count(), 2);
    }

    #[tokio::test]
    async fn test_json_export_is_default() {
        let state = state_with(vec![product("p1", "Lamp")], recent_orders());
        let (status, body) = send(state, get("/api/stats/export?range=week")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orders"].as_array().unwrap().len(), 3);
        assert_eq!(body["filters"]["range"], "week");
        assert_eq!(body["filters"]["product"], "all");
    }

    #[tokio::test]
    async fn test_json_export_names_selected_product() {
        let state = state_with(vec![product("p1", "Lamp")], recent_orders());
        let (status, body) = send(state, get("/api/stats/export?range=week&product=p1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filters"]["product"], "p1");
        assert_eq!(body["orders"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_cache_and_reports_error() {
        let state = state_with(vec![product("p1", "Lamp")], recent_orders());
        let request = axum::http::Request::post("/api/refresh")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, _) = send(state.clone(), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let cache = state.cache().read().await;
        assert_eq!(cache.products.items.len(), 1);
        assert!(cache.error().is_some());
    }
}
