use std::sync::Arc;

use scout_commerce::admin::{ApiKeys, ParserJob};
use scout_commerce::catalog::Product;
use scout_commerce::ids::ProductId;
use scout_data::{FetchClient, FetchError};
use scout_session::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FetchClient {
    FetchClient::new().with_base_url(format!("{}/api", server.uri()))
}

// === Product view ===

#[tokio::test]
async fn test_product_view_loads_product_then_offers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "title": "Pixel 8",
            "features": ["OLED", "Tensor G3", "128 GB", "5G"],
            "price": {"price_eur": 599.0}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/product/p1/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"merchant": "Shop A", "price": 589.99, "link": "https://a.example/p1"},
            {"merchant": "Shop B", "price": "€599,00", "link": "https://b.example/p1"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = Arc::new(HttpBackend::new(client_for(&server)));
    let view = ProductView::new(backend, ProductId::new("p1"));

    assert_eq!(view.load().await, ViewOutcome::Loaded);
    let product = view.state().product.unwrap();
    assert_eq!(product.feature_preview(3).more_label().as_deref(), Some("+1 more"));

    assert_eq!(view.show_offers().await, ViewOutcome::Loaded);
    let offers = view.state().offers;
    assert_eq!(offers[0].price_label(), "589.99");
    assert_eq!(offers[1].price_label(), "€599,00");
}

#[tokio::test]
async fn test_product_view_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Product not found"))
        .mount(&server)
        .await;

    let backend = Arc::new(HttpBackend::new(client_for(&server)));
    let view = ProductView::new(backend, ProductId::new("gone"));

    assert!(matches!(view.load().await, ViewOutcome::Failed(_)));
    assert!(view.state().product.is_none());
}

// === Admin ===

#[tokio::test]
async fn test_admin_parser_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/parser/start"))
        .and(body_json(json!({"url": "https://shop.example/phones", "category": "phones"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Parser started"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/parser/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/parser/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Parser stopping"})))
        .mount(&server)
        .await;

    let admin = AdminClient::new(client_for(&server));
    let job = ParserJob::new("https://shop.example/phones", "phones").unwrap();

    assert_eq!(admin.start_parser(&job).await.unwrap().status, "Parser started");
    assert_eq!(admin.parser_status().await.unwrap().status, "running");
    assert_eq!(admin.stop_parser().await.unwrap().status, "Parser stopping");
}

#[tokio::test]
async fn test_admin_parser_conflict_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/parser/start"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Parser is already running"))
        .mount(&server)
        .await;

    let admin = AdminClient::new(client_for(&server));
    let job = ParserJob::new("https://shop.example", "").unwrap();
    let err = admin.start_parser(&job).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn test_admin_keys_and_statistics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gemini_api_keys": "...abcd",
            "serpapi_api_keys": ""
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "API keys updated"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_requests": 12,
            "unique_queries": 4,
            "most_popular_query": "iphone"
        })))
        .mount(&server)
        .await;

    let admin = AdminClient::new(client_for(&server));

    let keys = admin.api_keys().await.unwrap();
    assert_eq!(keys.gemini_api_keys, "...abcd");

    let update = ApiKeys {
        gemini_api_keys: "new-key".to_string(),
        serpapi_api_keys: String::new(),
    };
    assert_eq!(admin.update_api_keys(&update).await.unwrap().status, "API keys updated");

    let stats = admin.statistics().await.unwrap();
    assert_eq!(stats.total_requests, 12);
    assert_eq!(stats.most_popular_query, "iphone");
}

#[tokio::test]
async fn test_admin_products_crud() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1", "title": "Phone"}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/products/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/products/p2"))
        .and(body_json(json!({"id": "p2", "title": "Tablet", "category": "tablets"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/products/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminClient::new(client_for(&server));
    let products = admin.products().await.unwrap();
    assert_eq!(products.len(), 1);

    let product = Product::new("p2", "Tablet").with_category("tablets");
    admin.add_product(&product).await.unwrap();
    admin.update_product(&product).await.unwrap();
    admin.delete_product(&ProductId::new("p1")).await.unwrap();
}

#[tokio::test]
async fn test_admin_logs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/logs/parser"))
        .respond_with(ResponseTemplate::new(200).set_body_string("parser listening on :8082\n"))
        .mount(&server)
        .await;

    let admin = AdminClient::new(client_for(&server));
    assert_eq!(admin.logs("parser").await.unwrap(), "parser listening on :8082\n");

    let err = admin.logs("  ").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl(_)));
}
