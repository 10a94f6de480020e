//! # Receipt Repository
//!
//! Persists a validated [`ReceiptDraft`] atomically.
//!
//! ## Write Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │   ├── for each line: resolve product by SKU                            │
//! │   │     └── unknown SKU → INSERT product (name = sku, price = unit)    │
//! │   ├── INSERT receipts (shop_id, total_cents, created_at)               │
//! │   ├── INSERT receipt_lines × N (unit price snapshot)                    │
//! │   └── key supplied? INSERT idempotency_keys (key, receipt_id)          │
//! │          └── UNIQUE violation → DbError::UniqueViolation               │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any `?` before COMMIT drops the transaction → ROLLBACK. Implicitly    │
//! │  created products disappear together with the receipt.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{map_unique, DbResult};
use crate::repository::idempotency::IDEMPOTENCY_KEY_FIELD;
use crate::repository::product;
use tally_core::{NewProduct, Receipt, ReceiptDraft, ReceiptLine};

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Stores a receipt, its lines, any implicitly created products and the
    /// optional idempotency key in one transaction.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation { field: "idempotency_key", .. }` when the
    ///   key was bound by a concurrent request. Nothing is persisted.
    /// - `DbError::ForeignKeyViolation` for an unknown shop.
    pub async fn create(
        &self,
        shop_id: i64,
        draft: &ReceiptDraft,
        idempotency_key: Option<&str>,
    ) -> DbResult<Receipt> {
        let mut tx = self.pool.begin().await?;

        let mut product_ids = Vec::with_capacity(draft.lines().len());
        for line in draft.lines() {
            let implicit = NewProduct::implicit(&line.sku, line.unit_price);
            let (product, _created) = product::create_or_get(&mut tx, &implicit).await?;
            product_ids.push(product.id);
        }

        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            INSERT INTO receipts (shop_id, total_cents, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, shop_id, total_cents, created_at
            "#,
        )
        .bind(shop_id)
        .bind(draft.total())
        .bind(crate::now())
        .fetch_one(&mut *tx)
        .await?;

        for (line, product_id) in draft.lines().iter().zip(product_ids) {
            sqlx::query(
                r#"
                INSERT INTO receipt_lines (receipt_id, product_id, qty, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(receipt.id)
            .bind(product_id)
            .bind(line.qty)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(key) = idempotency_key {
            sqlx::query(
                r#"
                INSERT INTO idempotency_keys (key, receipt_id, created_at)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(key)
            .bind(receipt.id)
            .bind(receipt.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique(e, IDEMPOTENCY_KEY_FIELD, key))?;
        }

        tx.commit().await?;

        debug!(
            id = receipt.id,
            shop_id,
            lines = draft.lines().len(),
            total = %receipt.total,
            "Stored receipt"
        );

        Ok(receipt)
    }

    /// Gets a receipt by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, shop_id, total_cents, created_at
            FROM receipts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Gets the lines of a receipt in insertion order.
    pub async fn lines(&self, receipt_id: i64) -> DbResult<Vec<ReceiptLine>> {
        let lines = sqlx::query_as::<_, ReceiptLine>(
            r#"
            SELECT id, receipt_id, product_id, qty, unit_price_cents
            FROM receipt_lines
            WHERE receipt_id = ?1
            ORDER BY id
            "#,
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Number of receipts stored for a shop.
    pub async fn count_for_shop(&self, shop_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts WHERE shop_id = ?1")
            .bind(shop_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
