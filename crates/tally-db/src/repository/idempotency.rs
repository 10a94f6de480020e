//! # Idempotency Key Repository
//!
//! Read side of idempotency keys. Keys are written only inside the receipt
//! transaction (see [`super::receipt`]); this repository answers "has this
//! key already produced a receipt?".

use sqlx::SqlitePool;

use crate::error::DbResult;
use tally_core::{IdempotencyKey, Receipt};

/// Field name reported by [`crate::DbError::UniqueViolation`] when a key is
/// already bound.
pub const IDEMPOTENCY_KEY_FIELD: &str = "idempotency_key";

/// Repository for idempotency key lookups.
#[derive(Debug, Clone)]
pub struct IdempotencyRepository {
    pool: SqlitePool,
}

impl IdempotencyRepository {
    /// Creates a new IdempotencyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IdempotencyRepository { pool }
    }

    /// Gets the stored key row, if any.
    pub async fn find_by_key(&self, key: &str) -> DbResult<Option<IdempotencyKey>> {
        let row = sqlx::query_as::<_, IdempotencyKey>(
            r#"
            SELECT id, key, receipt_id, created_at
            FROM idempotency_keys
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Gets the receipt a key is bound to, whatever shop it belongs to.
    ///
    /// Callers compare `receipt.shop_id` themselves before answering.
    pub async fn find_receipt(&self, key: &str) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT r.id, r.shop_id, r.total_cents, r.created_at
            FROM idempotency_keys k
            JOIN receipts r ON r.id = k.receipt_id
            WHERE k.key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::repository::test_support::db_with_shop;
    use tally_core::{Money, ReceiptDraft, ReceiptLineInput};

    #[tokio::test]
    async fn test_find_receipt_by_key() {
        let (db, _user, shop) = db_with_shop().await;
        let draft = ReceiptDraft::from_lines(&[ReceiptLineInput::new(
            "COCA-500",
            2,
            Money::from_cents(120),
        )])
        .unwrap();

        assert!(db.idempotency().find_receipt("idem-1").await.unwrap().is_none());
        assert!(db.idempotency().find_by_key("idem-1").await.unwrap().is_none());

        let receipt = db
            .receipts()
            .create(shop.id, &draft, Some("idem-1"))
            .await
            .unwrap();

        let found = db.idempotency().find_receipt("idem-1").await.unwrap().unwrap();
        assert_eq!(found, receipt);

        let key = db.idempotency().find_by_key("idem-1").await.unwrap().unwrap();
        assert_eq!(key.key, "idem-1");
        assert_eq!(key.receipt_id, Some(receipt.id));
    }
}
