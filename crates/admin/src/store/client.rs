//! HTTP client for the record store.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use shop_admin_core::{NewOrder, NewProduct, Order, OrderId, OrderPatch, Product, ProductId, ProductPatch};
use tracing::instrument;
use url::Url;

use super::StoreError;
use crate::config::StoreConfig;

const PRODUCTS: &str = "products";
const ORDERS: &str = "orders";

/// Record store API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

/// Body of a successful create.
#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

/// Body of a failed request.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl StoreClient {
    /// Create a client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidBaseUrl` if paths cannot be appended to the
    /// base URL, or `StoreError::Http` if the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(config.base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(StoreClientInner {
                client,
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
            }),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RequestFailed` on a non-success status, or
    /// `StoreError::Http` on network or decode failures.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.list(PRODUCTS, "fetch products").await
    }

    /// Create a product and return its new id.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_product(&self, draft: &NewProduct) -> Result<ProductId, StoreError> {
        self.create(PRODUCTS, draft, "add product")
            .await
            .map(ProductId::new)
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, id, patch), fields(id = %id))]
    pub async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), StoreError> {
        self.update(PRODUCTS, id.as_str(), patch, "update product").await
    }

    /// Delete a product. Orders referencing it are left alone.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        self.delete(PRODUCTS, id.as_str(), "delete product").await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch every order.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.list(ORDERS, "fetch orders").await
    }

    /// Create an order and return its new id.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, draft), fields(product_id = %draft.product_id))]
    pub async fn add_order(&self, draft: &NewOrder) -> Result<OrderId, StoreError> {
        self.create(ORDERS, draft, "add order").await.map(OrderId::new)
    }

    /// Apply a partial update to an order.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, id, patch), fields(id = %id))]
    pub async fn update_order(&self, id: &OrderId, patch: &OrderPatch) -> Result<(), StoreError> {
        self.update(ORDERS, id.as_str(), patch, "update order").await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_products`].
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), StoreError> {
        self.delete(ORDERS, id.as_str(), "delete order").await
    }

    // =========================================================================
    // Requests
    // =========================================================================

    async fn list<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        operation: &'static str,
    ) -> Result<Vec<T>, StoreError> {
        let response = self.send(Method::GET, &[collection], operation).await?;
        let records: Vec<Value> = response.json().await?;
        Ok(decode_records(records, collection))
    }

    async fn create<B: Serialize + Sync>(
        &self,
        collection: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<String, StoreError> {
        let url = self.endpoint(&[collection])?;
        let response = self.request(Method::POST, url).json(body).send().await?;
        let created: Created = check(response, operation).await?.json().await?;
        Ok(created.id)
    }

    async fn update<B: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(&[collection, id])?;
        let response = self.request(Method::PUT, url).json(body).send().await?;
        check(response, operation).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str, operation: &'static str) -> Result<(), StoreError> {
        self.send(Method::DELETE, &[collection, id], operation).await?;
        Ok(())
    }

    async fn send(&self, method: Method, segments: &[&str], operation: &'static str) -> Result<Response, StoreError> {
        let url = self.endpoint(segments)?;
        let response = self.request(method, url).send().await?;
        check(response, operation).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match &self.inner.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decode each record on its own, skipping the ones that do not fit `T`.
///
/// One bad record in the store must not cost the whole snapshot.
fn decode_records<T: DeserializeOwned>(records: Vec<Value>, collection: &'static str) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
            match serde_json::from_value(record) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(collection, id = %id, error = %e, "Skipping malformed record");
                    None
                }
            }
        })
        .collect()
}

/// Turn a non-success response into `StoreError::RequestFailed`, preferring
/// the store's own error message over the status line.
async fn check(response: Response, operation: &'static str) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| status.to_string());
    tracing::warn!(%status, operation, "store request failed");
    Err(StoreError::RequestFailed { operation, message })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, routing::get};
    use serde_json::json;

    use super::super::test_support::serve;
    use super::*;

    fn client(base: &str) -> StoreClient {
        StoreClient::new(&StoreConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let store = client("http://localhost:5000/api");
        assert_eq!(
            store.endpoint(&[PRODUCTS]).unwrap().as_str(),
            "http://localhost:5000/api/products"
        );

        let trailing = client("http://localhost:5000/api/");
        assert_eq!(
            trailing.endpoint(&[ORDERS, "o1"]).unwrap().as_str(),
            "http://localhost:5000/api/orders/o1"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let store = client("http://localhost:5000/api");
        assert_eq!(
            store.endpoint(&[ORDERS, "a/b c"]).unwrap().as_str(),
            "http://localhost:5000/api/orders/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let config = StoreConfig::new(Url::parse("mailto:store@shop.test").unwrap());
        assert!(matches!(StoreClient::new(&config), Err(StoreError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_decode_skips_malformed_records() {
        let records = vec![
            json!({ "id": "o1", "productId": "p1", "quantity": 1, "customerName": "Ada",
                    "customerEmail": "ada@example.com", "status": "completed" }),
            json!({ "id": "o2", "productId": "p1", "quantity": 2, "customerName": "Bo" }),
            json!({ "id": "o3", "productId": "p1", "quantity": "two", "customerName": "Cy",
                    "customerEmail": "cy@example.com" }),
            json!({ "id": "o4", "productId": "p1", "quantity": 1, "customerName": "Di",
                    "customerEmail": "di@example.com", "status": "shipped" }),
            json!("not a record"),
        ];
        let orders: Vec<Order> = decode_records(records, ORDERS);
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["o1", "o2"]);
        assert_eq!(orders[1].customer_email, "");
    }

    #[tokio::test]
    async fn test_fetch_keeps_valid_records() {
        let app = Router::new().route(
            "/api/orders",
            get(|| async {
                Json(json!([
                    { "id": "o1", "productId": "p1", "quantity": 1, "customerName": "Ada",
                      "customerEmail": "ada@example.com" },
                    { "id": "o2", "productId": "p1", "quantity": -3, "customerName": "Bo",
                      "customerEmail": "bo@example.com" },
                ]))
            }),
        );
        let orders = serve(app).await.fetch_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id.as_str(), "o1");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_http_error() {
        let mut config = StoreConfig::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        config.timeout = std::time::Duration::from_secs(2);
        let store = StoreClient::new(&config).unwrap();
        let err = store.fetch_products().await.unwrap_err();
        assert!(matches!(err, StoreError::Http(_)));
    }
}
