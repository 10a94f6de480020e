//! Shop creation and the shared product catalog.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn create_shop_returns_id_and_name() {
    let app = TestApp::new().await;
    let token = app.register("ana@example.com").await;

    let (status, body) = app.post("/shops", Some(&token), json!({ "name": "Kiosk" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Kiosk");
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn duplicate_shop_name_conflicts_per_owner() {
    let app = TestApp::new().await;
    let ana = app.register("ana@example.com").await;
    let bob = app.register("bob@example.com").await;
    app.create_shop(&ana, "Kiosk").await;

    let (status, _) = app.post("/shops", Some(&ana), json!({ "name": "Kiosk" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post("/shops", Some(&bob), json!({ "name": "Kiosk" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn product_is_created_then_returned_unchanged() {
    let app = TestApp::new().await;
    let token = app.register("ana@example.com").await;

    let (status, first) = app
        .post(
            "/products",
            Some(&token),
            json!({ "sku": "COCA-500", "name": "Coca-Cola 500ml", "price": 1.2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["sku"], "COCA-500");
    assert_eq!(first["price"], 1.2);

    let (status, second) = app
        .post(
            "/products",
            Some(&token),
            json!({ "sku": "COCA-500", "name": "Other", "price": 9.99 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
}

#[tokio::test]
async fn negative_product_price_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register("ana@example.com").await;

    let (status, body) = app
        .post(
            "/products",
            Some(&token),
            json!({ "sku": "COCA-500", "name": "Coca", "price": -1 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn sub_cent_negative_product_price_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register("ana@example.com").await;

    let (status, body) = app
        .post(
            "/products",
            Some(&token),
            json!({ "sku": "COCA-500", "name": "Coca", "price": -0.001 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn products_require_authentication() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/products", None, json!({ "sku": "X", "name": "X", "price": 1 }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
