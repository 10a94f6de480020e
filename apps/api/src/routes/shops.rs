//! Shop routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::services::shop_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/shops", post(create_shop))
}

#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ShopResponse {
    pub id: i64,
    pub name: String,
}

/// Create a shop owned by the caller.
pub async fn create_shop(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateShopRequest>,
) -> Result<(StatusCode, Json<ShopResponse>), ApiError> {
    let shop = shop_service::create_shop(state.db(), &user, &body.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShopResponse {
            id: shop.id,
            name: shop.name,
        }),
    ))
}
