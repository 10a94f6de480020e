//! # User Repository
//!
//! Account storage. Emails arrive here already normalised (trimmed,
//! lower-cased) by the validation layer; uniqueness is enforced by the
//! `users.email` UNIQUE constraint.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{map_unique, DbResult};
use tally_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts an active user.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation { field: "email", .. }` if the email is taken.
    pub async fn create(&self, email: &str, password_hash: &str) -> DbResult<User> {
        debug!(email = %email, "Creating user");

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, is_active, created_at)
            VALUES (?1, ?2, 1, ?3)
            RETURNING id, email, password_hash, is_active, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(crate::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "email", email))?;

        Ok(user)
    }

    /// Looks up a user by (normalised) email.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Activates or deactivates a user. Inactive users cannot log in.
    pub async fn set_active(&self, id: i64, active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(crate::DbError::not_found("User", id.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.users().create("ana@example.com", "$argon2id$x").await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);

        let found = db
            .users()
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, created);

        let by_id = db.users().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ana@example.com");

        assert!(db.users().find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.users().create("ana@example.com", "h1").await.unwrap();
        let err = db.users().create("ana@example.com", "h2").await.unwrap_err();

        assert!(err.is_duplicate_of("email"));
    }

    #[tokio::test]
    async fn test_set_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db.users().create("ana@example.com", "h").await.unwrap();

        db.users().set_active(user.id, false).await.unwrap();
        let reloaded = db.users().get_by_id(user.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);

        let err = db.users().set_active(9999, true).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
