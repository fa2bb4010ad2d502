//! Integration tests for the statistics report and exports.
//!
//! These tests require the admin server running against a record store.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;
use shop_admin_integration_tests::{client, url};

#[tokio::test]
#[ignore = "Requires running admin server and record store"]
async fn test_report_sections() {
    let resp = client()
        .get(url("/api/stats?range=year"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Invalid report");
    for key in [
        "window",
        "summary",
        "statusDistribution",
        "productSales",
        "productQuantity",
        "ordersOverTime",
        "topProducts",
    ] {
        assert!(!body[key].is_null(), "missing {key}");
    }
    assert!(body["loading"].is_boolean());
    assert_eq!(body["ordersOverTime"]["granularity"], "month");
    assert_eq!(body["ordersOverTime"]["buckets"].as_array().expect("buckets").len(), 12);
    assert!(body["topProducts"].as_array().expect("top products").len() <= 5);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_custom_range_validation() {
    let resp = client()
        .get(url("/api/stats?range=custom&start=2025-02-01&end=2025-01-01"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server and record store"]
async fn test_csv_export() {
    let resp = client()
        .get(url("/api/stats/export?format=csv&range=month"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/csv");
    let disposition = resp.headers()[CONTENT_DISPOSITION]
        .to_str()
        .expect("ascii header")
        .to_string();
    assert!(disposition.contains("orders-export-"));

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with("id,product,customer,status,date"));
}

#[tokio::test]
#[ignore = "Requires running admin server and record store"]
async fn test_refresh_reports_counts() {
    let resp = client()
        .post(url("/api/refresh"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid body");
    assert!(body["products"].is_u64());
    assert!(body["orders"].is_u64());
}
