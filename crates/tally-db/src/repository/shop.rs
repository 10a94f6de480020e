//! # Shop Repository
//!
//! Shops are the tenants of the system. Each belongs to exactly one owner
//! and names are unique per owner (`UNIQUE (owner_id, name)`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{map_unique, DbResult};
use tally_core::Shop;

/// Repository for shop database operations.
#[derive(Debug, Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    /// Creates a new ShopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopRepository { pool }
    }

    /// Inserts a shop for `owner_id`.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation { field: "shop_name", .. }` if the owner
    /// already has a shop with this name.
    pub async fn create(&self, owner_id: i64, name: &str) -> DbResult<Shop> {
        debug!(owner_id, name = %name, "Creating shop");

        let shop = sqlx::query_as::<_, Shop>(
            r#"
            INSERT INTO shops (owner_id, name, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, owner_id, name, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(crate::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "shop_name", name))?;

        Ok(shop)
    }

    /// Gets a shop by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Shop>> {
        let shop = sqlx::query_as::<_, Shop>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM shops
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shop)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
