//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tally_api::{router, ApiConfig, AppState};
use tally_db::{Database, DbConfig};
use tower::ServiceExt;

pub const PASSWORD: &str = "ChangeMe123";

/// Router plus a handle on its database for assertions.
pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ApiConfig {
            jwt_secret: "integration-secret".to_string(),
            ..ApiConfig::default()
        };

        TestApp {
            router: router(AppState::new(db.clone(), &config)),
            db,
        }
    }

    /// Sends one request and returns the status and the JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        extra_headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, &[], Some(body)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, &[], None).await
    }

    /// Registers `email` and returns its access token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Creates a shop and returns its id.
    pub async fn create_shop(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self.post("/shops", Some(token), json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "create shop failed: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Posts a receipt, optionally with an idempotency key.
    pub async fn post_receipt(
        &self,
        token: &str,
        shop_id: i64,
        key: Option<&str>,
        lines: Value,
    ) -> (StatusCode, Value) {
        let headers: Vec<(&str, &str)> = key.map(|k| ("Idempotency-Key", k)).into_iter().collect();

        self.send(
            Method::POST,
            &format!("/shops/{shop_id}/receipts"),
            Some(token),
            &headers,
            Some(json!({ "lines": lines })),
        )
        .await
    }

    pub async fn kpis(&self, token: &str, shop_id: i64, query: &str) -> (StatusCode, Value) {
        self.get(&format!("/shops/{shop_id}/kpis{query}"), Some(token)).await
    }
}
