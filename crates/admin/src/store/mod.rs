//! Record store API client.
//!
//! The store is a plain JSON document service with one collection per
//! entity:
//!
//! - `GET {base}/products` lists every product
//! - `POST {base}/products` creates one and answers `{ "id": ... }`
//! - `PUT {base}/products/{id}` applies a partial update
//! - `DELETE {base}/products/{id}` removes one
//!
//! and the same for `orders`. Failed requests answer a non-success status,
//! usually with an `{ "error": "..." }` body.

pub mod client;

pub use client::StoreClient;

use thiserror::Error;

/// Errors that can occur when talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure, timeout or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Failed to {operation}: {message}")]
    RequestFailed {
        operation: &'static str,
        message: String,
    },

    /// The configured base URL cannot have collection paths appended.
    #[error("Invalid store base URL: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display() {
        let err = StoreError::RequestFailed {
            operation: "fetch orders",
            message: "503 Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch orders: 503 Service Unavailable");
    }

    #[test]
    fn test_invalid_base_url_display() {
        let err = StoreError::InvalidBaseUrl("mailto:store@shop.test".to_string());
        assert_eq!(err.to_string(), "Invalid store base URL: mailto:store@shop.test");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use axum::Router;
    use url::Url;

    use super::StoreClient;
    use crate::config::StoreConfig;

    /// Serve `app` on an ephemeral local port as a stand-in store under `/api`.
    pub async fn serve(app: Router) -> StoreClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        let base = Url::parse(&format!("http://{addr}/api")).unwrap();
        StoreClient::new(&StoreConfig::new(base)).unwrap()
    }
}
