//! Receipt intake route.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tally_core::money::{self, Money};
use tally_core::ReceiptLineInput;

use crate::error::ApiError;
use crate::extract::{ApiBytes, ApiPath, CurrentUser};
use crate::services::{receipt_service, shop_service};
use crate::state::AppState;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

pub fn router() -> Router<AppState> {
    Router::new().route("/shops/{shop_id}/receipts", post(create_receipt))
}

#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    pub lines: Vec<ReceiptLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptLineRequest {
    pub sku: String,
    pub qty: i64,
    #[serde(with = "money::as_major_units")]
    pub unit_price: Money,
}

impl From<ReceiptLineRequest> for ReceiptLineInput {
    fn from(line: ReceiptLineRequest) -> Self {
        ReceiptLineInput::new(line.sku, line.qty, line.unit_price)
    }
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub id: i64,
    #[serde(with = "money::as_major_units")]
    pub total: Money,
}

/// Record a sale. Replays with a known `Idempotency-Key` also answer `201`
/// with the stored receipt.
///
/// The body is read raw and decoded only once the caller is known to own the
/// shop, so a stranger gets `403` whatever they send.
pub async fn create_receipt(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(shop_id): ApiPath<i64>,
    headers: HeaderMap,
    ApiBytes(body): ApiBytes,
) -> Result<(StatusCode, Json<ReceiptResponse>), ApiError> {
    let shop = shop_service::ensure_shop_owner(state.db(), shop_id, &user).await?;

    let Json(request) = Json::<CreateReceiptRequest>::from_bytes(&body)?;

    let key = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ApiError::invalid_input("Idempotency-Key must be visible ASCII"))
        })
        .transpose()?;

    let lines: Vec<ReceiptLineInput> = request.lines.into_iter().map(Into::into).collect();

    let result = receipt_service::create_receipt(state.db(), &shop, &lines, key).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReceiptResponse {
            id: result.id,
            total: result.total,
        }),
    ))
}
