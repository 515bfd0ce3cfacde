//! Handler tests for the Products domain
//!
//! These drive the domain router directly with `oneshot()` against the
//! in-memory store and check:
//! - Request deserialization and validation
//! - Response bodies
//! - HTTP status codes, including the empty-list and delete mappings
//! - Error response shape

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::ErrorResponse;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with(service: ProductService<InMemoryProductStore>) -> Router {
    handlers::router(service)
}

fn app() -> Router {
    app_with(ProductService::new(InMemoryProductStore::new()))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_product_handler_returns_201() {
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let name = builder.name("product", "desk");

    let response = app()
        .oneshot(json_request("POST", "/", json!({ "name": name, "price": 99.5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: ProductView = json_body(response.into_body()).await;
    assert!(product.id.is_some());
    assert_eq!(product.name, name);
    assert_eq!(product.price, 99.5);
}

#[tokio::test]
async fn test_create_product_handler_ignores_client_id() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "id": 777, "name": "Lamp", "price": 12.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product: ProductView = json_body(response.into_body()).await;
    assert_ne!(product.id, Some(777));
}

#[tokio::test]
async fn test_create_product_handler_validates_input() {
    let app = app();

    for body in [
        json!({ "name": "", "price": 1.0 }),
        json!({ "name": "   ", "price": 1.0 }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.error, "VALIDATION_ERROR");
        assert!(error.details.is_some());
    }
}

#[tokio::test]
async fn test_create_product_handler_accepts_negative_price() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "name": "Refund", "price": -0.5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product: ProductView = json_body(response.into_body()).await;
    assert_eq!(product.price, -0.5);
}

#[tokio::test]
async fn test_create_product_handler_rejects_null_and_partial_bodies() {
    let app = app();

    for body in [json!(null), json!({}), json!({ "name": "Chair" })] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_create_product_handler_returns_409_on_duplicate_name() {
    let app = app();

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Desk", "price": 10.0 })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/", json!({ "name": "Desk", "price": 20.0 })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let error: ErrorResponse = json_body(second.into_body()).await;
    assert_eq!(error.code, 1008);
    assert_eq!(error.message, "Product with name 'Desk' already exists");
}

#[tokio::test]
async fn test_get_product_handler() {
    let service = ProductService::new(InMemoryProductStore::new());
    let created = service
        .create_product(ProductView::new("Desk", 10.0))
        .await
        .unwrap();
    let id = created.id.unwrap();
    let app = app_with(service);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let product: ProductView = json_body(response.into_body()).await;
    assert_eq!(product, created);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", id + 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
}

#[tokio::test]
async fn test_id_path_rejects_non_numeric_ids() {
    let app = app();

    for (method, uri) in [("GET", "/abc"), ("DELETE", "/1.5")] {
        let response = app.clone().oneshot(empty_request(method, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");

        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.error, "INVALID_ID");
    }
}

#[tokio::test]
async fn test_update_product_handler() {
    let service = ProductService::new(InMemoryProductStore::new());
    let created = service
        .create_product(ProductView::new("Desk", 10.0))
        .await
        .unwrap();
    let id = created.id.unwrap();
    let app = app_with(service.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}"),
            json!({ "name": "Desk XL", "price": 15.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: ProductView = json_body(response.into_body()).await;
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "Desk XL");
    assert_eq!(service.get_product(id).await.unwrap(), updated);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/999",
            json!({ "name": "Ghost", "price": 1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_handler_returns_deleted_product() {
    let service = ProductService::new(InMemoryProductStore::new());
    let created = service
        .create_product(ProductView::new("Desk", 10.0))
        .await
        .unwrap();
    let id = created.id.unwrap();
    let app = app_with(service.clone());

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let deleted: ProductView = json_body(response.into_body()).await;
    assert_eq!(deleted, created);
    assert_eq!(
        service.get_product(id).await.unwrap_err(),
        ProductError::NotFound(id)
    );
}

#[tokio::test]
async fn test_delete_unknown_product_returns_500() {
    let response = app()
        .oneshot(empty_request("DELETE", "/42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INTERNAL_ERROR");
    assert_eq!(error.message, "Product with id 42 not found");
}

#[tokio::test]
async fn test_list_products_handler() {
    let service = ProductService::new(InMemoryProductStore::new());
    let app = app_with(service.clone());

    let response = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let products: Vec<ProductView> = json_body(response.into_body()).await;
    assert!(products.is_empty());

    service.create_product(ProductView::new("A", 1.0)).await.unwrap();
    service.create_product(ProductView::new("B", 2.0)).await.unwrap();

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductView> = json_body(response.into_body()).await;
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
}
