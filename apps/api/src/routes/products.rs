//! Product catalog routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tally_core::money::{self, Money};
use tally_core::Product;

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::services::catalog_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/products", post(create_product))
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    #[serde(with = "money::as_major_units")]
    pub price: Money,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(with = "money::as_major_units")]
    pub price: Money,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            sku: product.sku,
            name: product.name,
            price: product.price,
        }
    }
}

/// Register a product. `201` when inserted, `200` with the stored product
/// when the SKU already exists.
pub async fn create_product(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let (product, created) =
        catalog_service::create_product(state.db(), &body.sku, &body.name, body.price).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(product.into())))
}
