//! Request extractors.
//!
//! - [`CurrentUser`] resolves the bearer token to an active [`User`]
//! - [`ApiJson`], [`ApiPath`], [`ApiQuery`], [`ApiBytes`] wrap axum's
//!   extractors so that malformed input is answered with the regular
//!   `INVALID_INPUT` body

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tally_core::User;
use tracing::warn;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// The authenticated caller.
///
/// Rejected with `401` when the header is missing or malformed, the token
/// does not verify, or the user is unknown or inactive.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                warn!("Missing or unreadable Authorization header");
                ApiError::unauthorized("Not authenticated")
            })?;

        let token = extract_bearer_token(header).ok_or_else(|| {
            warn!("Authorization header is not a bearer token");
            ApiError::unauthorized("Not authenticated")
        })?;

        let claims = state.jwt().validate(token).inspect_err(|_| {
            warn!("Bearer token rejected");
        })?;

        let user = state.db().users().find_by_email(&claims.sub).await?;

        match user {
            Some(user) if user.is_active => Ok(CurrentUser(user)),
            Some(user) => {
                warn!(user_id = user.id, "Token presented for inactive user");
                Err(ApiError::unauthorized(INVALID_CREDENTIALS))
            }
            None => {
                warn!("Token subject does not match any user");
                Err(ApiError::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

/// JSON body extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Raw body extractor that rejects with [`ApiError`].
///
/// For handlers that must authorize before decoding the payload.
#[derive(Debug, FromRequest)]
#[from_request(rejection(ApiError))]
pub struct ApiBytes(pub axum::body::Bytes);
