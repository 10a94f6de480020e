//! Account registration and login.
//!
//! Password hashing is CPU-bound, so both operations hand it to the
//! blocking thread pool.

use tally_core::validation::{validate_email, validate_password};
use tally_db::Database;
use tokio::task;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, JwtManager};
use crate::error::ApiError;

const INVALID_LOGIN: &str = "Invalid email or password";

/// Creates an account and returns an access token for it.
pub async fn register(
    db: &Database,
    jwt: &JwtManager,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let email = validate_email(email)?;
    validate_password(password)?;

    let password = password.to_string();
    let password_hash = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task failed: {}", e)))??;

    let user = db.users().create(&email, &password_hash).await.map_err(|e| {
        if e.is_duplicate_of("email") {
            ApiError::conflict("Email already registered")
        } else {
            e.into()
        }
    })?;

    info!(user_id = user.id, "User registered");
    jwt.issue(&user.email)
}

/// Checks credentials and returns an access token.
///
/// Unknown email, wrong password and inactive account all answer with the
/// same message.
pub async fn login(
    db: &Database,
    jwt: &JwtManager,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let email = validate_email(email).map_err(|_| ApiError::unauthorized(INVALID_LOGIN))?;

    let Some(user) = db.users().find_by_email(&email).await? else {
        warn!("Login attempt for unknown account");
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    };

    let password = password.to_string();
    let stored_hash = user.password_hash.clone();
    let valid = task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::internal(format!("Password verification task failed: {}", e)))?;

    if !valid {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    }

    if !user.is_active {
        warn!(user_id = user.id, "Login refused: account inactive");
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    }

    info!(user_id = user.id, "User logged in");
    jwt.issue(&user.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_support::test_db;

    fn jwt() -> JwtManager {
        JwtManager::new("test-secret", 60)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = test_db().await;
        let jwt = jwt();

        let token = register(&db, &jwt, " Ana@Example.com ", "ChangeMe123").await.unwrap();
        assert_eq!(jwt.validate(&token).unwrap().sub, "ana@example.com");

        let token = login(&db, &jwt, "ana@example.com", "ChangeMe123").await.unwrap();
        assert_eq!(jwt.validate(&token).unwrap().sub, "ana@example.com");
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let db = test_db().await;
        let jwt = jwt();

        register(&db, &jwt, "ana@example.com", "ChangeMe123").await.unwrap();
        let err = register(&db, &jwt, "ANA@example.com", "Another123").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_register_rejects_weak_input() {
        let db = test_db().await;
        let jwt = jwt();

        let err = register(&db, &jwt, "not-an-email", "ChangeMe123").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = register(&db, &jwt, "ana@example.com", "short").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let db = test_db().await;
        let jwt = jwt();
        register(&db, &jwt, "ana@example.com", "ChangeMe123").await.unwrap();

        let wrong_password = login(&db, &jwt, "ana@example.com", "WrongPass123").await.unwrap_err();
        let unknown_user = login(&db, &jwt, "bob@example.com", "ChangeMe123").await.unwrap_err();

        assert_eq!(wrong_password.code, ErrorCode::Unauthorized);
        assert_eq!(unknown_user.code, ErrorCode::Unauthorized);
        assert_eq!(wrong_password.message, unknown_user.message);
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_login() {
        let db = test_db().await;
        let jwt = jwt();
        register(&db, &jwt, "ana@example.com", "ChangeMe123").await.unwrap();

        let user = db.users().find_by_email("ana@example.com").await.unwrap().unwrap();
        db.users().set_active(user.id, false).await.unwrap();

        let err = login(&db, &jwt, "ana@example.com", "ChangeMe123").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
