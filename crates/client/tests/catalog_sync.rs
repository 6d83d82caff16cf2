//! HTTP-level tests for catalog synchronization.

#![allow(clippy::unwrap_used)]

mod common;

use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{EventLog, LoggingStore, RecordingNotifier, product_json, test_config};
use shopkeeper_client::{
    ApiClient, CatalogStore, Controller, FetchError, MemoryTokenStore, SessionStore, TOKEN_KEY,
    TokenStore,
};
use shopkeeper_core::ProductId;

const PRODUCTS_PATH: &str = "/api/teststore/admin/products/all";

fn catalog_over(server_uri: &str) -> CatalogStore {
    CatalogStore::new(ApiClient::new(&test_config(server_uri)))
}

#[tokio::test]
async fn fetch_replaces_catalog_wholesale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": {"9": product_json("9", "Discontinued Blend")}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": {
                "1": product_json("1", "Mountain Blend"),
                "2": product_json("2", "Valley Roast")
            }
        })))
        .mount(&server)
        .await;

    let mut catalog = catalog_over(&server.uri());

    catalog.fetch_all("tok").await.unwrap();
    assert!(catalog.get(&ProductId::from("9")).is_some());

    catalog.fetch_all("tok").await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(&ProductId::from("1")).is_some());
    assert!(catalog.get(&ProductId::from("2")).is_some());
    assert!(catalog.get(&ProductId::from("9")).is_none());
}

#[tokio::test]
async fn empty_catalog_is_an_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": {}})))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Some service responses omit the field entirely
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut catalog = catalog_over(&server.uri());

    catalog.fetch_all("tok").await.unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);

    catalog.fetch_all("tok").await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn failed_fetch_keeps_previous_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": {
                "1": product_json("1", "Mountain Blend"),
                "2": product_json("2", "Valley Roast")
            }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "internal error"})),
        )
        .mount(&server)
        .await;

    let mut catalog = catalog_over(&server.uri());
    catalog.fetch_all("tok").await.unwrap();

    let err = catalog.fetch_all("tok").await.unwrap_err();
    assert!(matches!(err, FetchError::Rejected { status: 500, .. }));

    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(&ProductId::from("1")).is_some());
}

#[tokio::test]
async fn selection_dangles_after_replacement() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": {"1": product_json("1", "Mountain Blend")}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": {
                "2": product_json("2", "Valley Roast"),
                "3": product_json("3", "Harbor Decaf")
            }
        })))
        .mount(&server)
        .await;

    let mut catalog = catalog_over(&server.uri());
    catalog.fetch_all("tok").await.unwrap();
    catalog.select("1");
    assert_eq!(catalog.selected_product().unwrap().title, "Mountain Blend");

    catalog.fetch_all("tok").await.unwrap();

    // The stale selection is preserved, not cleared or remapped
    assert_eq!(catalog.selection(), Some(&ProductId::from("1")));
    assert!(catalog.selected_product().is_none());
}

#[tokio::test]
async fn refresh_failure_is_silent() {
    let server = MockServer::start().await;
    let mut storage = MemoryTokenStore::new();
    let notifier = RecordingNotifier::default();

    storage
        .set(TOKEN_KEY, "tok-saved", Utc::now() + Duration::days(7))
        .unwrap();

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let api = ApiClient::new(&config);
    let mut controller = Controller::new(
        SessionStore::new(
            api.clone(),
            Box::new(LoggingStore::new(storage, EventLog::default())),
        ),
        CatalogStore::new(api),
        notifier.clone(),
    );
    controller.startup().await;

    // The fetch failed but the user sees nothing; only the log knows
    assert!(controller.is_authenticated());
    assert!(controller.catalog().is_empty());
    assert!(notifier.notices().is_empty());
    assert!(!controller.gate().is_loading());
}

#[tokio::test]
async fn refresh_without_session_is_a_no_op() {
    let server = MockServer::start().await;
    let notifier = RecordingNotifier::default();

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let api = ApiClient::new(&config);
    let mut controller = Controller::new(
        SessionStore::new(
            api.clone(),
            Box::new(LoggingStore::new(MemoryTokenStore::new(), EventLog::default())),
        ),
        CatalogStore::new(api),
        notifier.clone(),
    );

    controller.refresh().await;

    assert!(!controller.is_authenticated());
    assert!(controller.catalog().is_empty());
    assert!(notifier.notices().is_empty());
    assert!(!controller.gate().is_loading());
}
