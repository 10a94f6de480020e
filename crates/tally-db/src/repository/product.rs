//! # Product Repository
//!
//! The product catalog is global: one SKU identifies one product across
//! every shop.
//!
//! ## Insert-or-Get
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INSERT ... ON CONFLICT(sku) DO NOTHING RETURNING ...                   │
//! │       │                                                                 │
//! │       ├── row returned  → we created it          (created = true)      │
//! │       │                                                                 │
//! │       └── no row        → SKU already existed                          │
//! │                └── SELECT by sku → stored row     (created = false)     │
//! │                                                                         │
//! │  Two concurrent inserts of the same SKU both end with the stored row.  │
//! │  Existing products are never updated (first-seen price wins).          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by SKU.
    pub async fn find_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        find_by_sku(&mut conn, sku).await
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, sku, name, price_cents, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts the product unless its SKU exists.
    ///
    /// ## Returns
    /// The stored product and whether this call created it.
    pub async fn create_or_get(&self, new: &NewProduct) -> DbResult<(Product, bool)> {
        let mut conn = self.pool.acquire().await?;
        create_or_get(&mut conn, new).await
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers (shared with the receipt transaction)
// =============================================================================

pub(crate) async fn find_by_sku(
    conn: &mut SqliteConnection,
    sku: &str,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, sku, name, price_cents, created_at
        FROM products
        WHERE sku = ?1
        "#,
    )
    .bind(sku)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

pub(crate) async fn create_or_get(
    conn: &mut SqliteConnection,
    new: &NewProduct,
) -> DbResult<(Product, bool)> {
    let inserted = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (sku, name, price_cents, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(sku) DO NOTHING
        RETURNING id, sku, name, price_cents, created_at
        "#,
    )
    .bind(&new.sku)
    .bind(&new.name)
    .bind(new.price)
    .bind(crate::now())
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(product) = inserted {
        debug!(id = product.id, sku = %product.sku, "Created product");
        return Ok((product, true));
    }

    let existing = find_by_sku(conn, &new.sku)
        .await?
        .ok_or_else(|| DbError::not_found("Product", new.sku.clone()))?;

    Ok((existing, false))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use tally_core::{Money, NewProduct};

    fn coke(price: i64) -> NewProduct {
        NewProduct {
            sku: "COCA-500".to_string(),
            name: "Coca-Cola 500ml".to_string(),
            price: Money::from_cents(price),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_existing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let (first, created) = db.products().create_or_get(&coke(120)).await.unwrap();
        assert!(created);
        assert_eq!(first.price.cents(), 120);

        // Same SKU, different price: stored row is returned unchanged
        let (second, created) = db.products().create_or_get(&coke(999)).await.unwrap();
        assert!(!created);
        assert_eq!(second, first);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (product, _) = db.products().create_or_get(&coke(120)).await.unwrap();

        let by_sku = db.products().find_by_sku("COCA-500").await.unwrap().unwrap();
        assert_eq!(by_sku.id, product.id);

        let by_id = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Coca-Cola 500ml");

        assert!(db.products().find_by_sku("NOPE").await.unwrap().is_none());
    }
}
