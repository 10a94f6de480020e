//! Registration and login routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::auth_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Credentials body. Deliberately not `Debug`: it carries a password.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        TokenResponse {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Create an account. Answers `201` with a token for the new user.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let token = auth_service::register(state.db(), state.jwt(), &body.email, &body.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token))))
}

/// Exchange credentials for a token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = auth_service::login(state.db(), state.jwt(), &body.email, &body.password).await?;

    Ok(Json(TokenResponse::bearer(token)))
}
