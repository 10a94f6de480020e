//! # Receipt Intake
//!
//! Records a sale for a shop, at most once per idempotency key.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  route: ensure_shop_owner             → 404 / 403 (before the body)    │
//! │       │                                                                 │
//! │  create_receipt(shop, lines, Idempotency-Key?)                          │
//! │       │                                                                 │
//! │       ├── validate key (blank = none, ≤ 64 chars)                      │
//! │       │                                                                 │
//! │       ├── key already bound? ──yes──► same shop?  → replay {id, total} │
//! │       │                               other shop? → 409                │
//! │       │                                                                 │
//! │       ├── ReceiptDraft::from_lines    → 400, nothing written           │
//! │       │                                                                 │
//! │       └── ReceiptRepository::create   (one transaction)                │
//! │                │                                                        │
//! │                ├── OK                 → {id, total}                     │
//! │                └── key taken by a concurrent request                   │
//! │                      → rolled back, re-read key, replay or 409         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A replay does not look at the new body at all: the receipt stored for the
//! key is the answer, even when the lines differ.

use tally_core::validation::validate_idempotency_key;
use tally_core::{Receipt, ReceiptDraft, ReceiptLineInput, ReceiptResult, Shop};
use tally_db::repository::idempotency::IDEMPOTENCY_KEY_FIELD;
use tally_db::Database;
use tracing::{info, warn};

use crate::error::ApiError;

const KEY_ALREADY_USED: &str = "Idempotency key already used";

/// Stores a receipt for `shop`, or replays the one bound to
/// `idempotency_key`.
///
/// `shop` must already have passed
/// [`ensure_shop_owner`](crate::services::shop_service::ensure_shop_owner).
pub async fn create_receipt(
    db: &Database,
    shop: &Shop,
    lines: &[ReceiptLineInput],
    idempotency_key: Option<&str>,
) -> Result<ReceiptResult, ApiError> {
    let key = validate_idempotency_key(idempotency_key)?;

    if let Some(key) = key.as_deref() {
        if let Some(existing) = db.idempotency().find_receipt(key).await? {
            return replay(shop, existing);
        }
    }

    let draft = ReceiptDraft::from_lines(lines)?;
    persist(db, shop, &draft, key.as_deref()).await
}

/// Writes the draft. A lost race on the key resolves to the winner's receipt.
async fn persist(
    db: &Database,
    shop: &Shop,
    draft: &ReceiptDraft,
    key: Option<&str>,
) -> Result<ReceiptResult, ApiError> {
    match db.receipts().create(shop.id, draft, key).await {
        Ok(receipt) => {
            info!(
                receipt_id = receipt.id,
                shop_id = shop.id,
                total = %receipt.total,
                idempotent = key.is_some(),
                "Receipt created"
            );
            Ok(ReceiptResult::from(&receipt))
        }
        Err(err) if err.is_duplicate_of(IDEMPOTENCY_KEY_FIELD) => {
            let Some(key) = key else {
                return Err(err.into());
            };

            match db.idempotency().find_receipt(key).await? {
                Some(existing) => replay(shop, existing),
                None => Err(ApiError::conflict(KEY_ALREADY_USED)),
            }
        }
        Err(err) => Err(err.into()),
    }
}

fn replay(shop: &Shop, existing: Receipt) -> Result<ReceiptResult, ApiError> {
    if existing.shop_id != shop.id {
        warn!(
            shop_id = shop.id,
            "Idempotency key is bound to a receipt of another shop"
        );
        return Err(ApiError::conflict(KEY_ALREADY_USED));
    }

    info!(receipt_id = existing.id, shop_id = shop.id, "Receipt replayed");
    Ok(ReceiptResult::from(&existing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_support::db_with_shop;
    use tally_core::Money;

    fn line(sku: &str, qty: i64, cents: i64) -> ReceiptLineInput {
        ReceiptLineInput::new(sku, qty, Money::from_cents(cents))
    }

    #[tokio::test]
    async fn test_total_is_sum_of_lines() {
        let (db, _owner, shop) = db_with_shop().await;

        let result = create_receipt(
            &db,
            &shop,
            &[line("COCA-500", 2, 120), line("AGUA-0500", 1, 100)],
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.total.cents(), 340);
        assert_eq!(db.receipts().lines(result.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_same_key_replays_first_receipt() {
        let (db, _owner, shop) = db_with_shop().await;

        let first = create_receipt(&db, &shop, &[line("COCA-500", 2, 120)], Some("idem-1"))
            .await
            .unwrap();
        let second = create_receipt(&db, &shop, &[line("AGUA-0500", 9, 100)], Some("idem-1"))
            .await
            .unwrap();

        assert_eq!(second, first);
        assert_eq!(db.receipts().count_for_shop(shop.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replay_skips_body_validation() {
        let (db, _owner, shop) = db_with_shop().await;

        let first = create_receipt(&db, &shop, &[line("COCA-500", 2, 120)], Some("idem-1"))
            .await
            .unwrap();
        let replayed = create_receipt(&db, &shop, &[], Some("idem-1"))
            .await
            .unwrap();

        assert_eq!(replayed, first);
    }

    #[tokio::test]
    async fn test_blank_key_is_ignored() {
        let (db, _owner, shop) = db_with_shop().await;

        let a = create_receipt(&db, &shop, &[line("COCA-500", 1, 120)], Some("  "))
            .await
            .unwrap();
        let b = create_receipt(&db, &shop, &[line("COCA-500", 1, 120)], Some(""))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert!(db.idempotency().find_by_key("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overlong_key_is_invalid() {
        let (db, _owner, shop) = db_with_shop().await;
        let key = "k".repeat(65);

        let err = create_receipt(&db, &shop, &[line("COCA-500", 1, 120)], Some(&key))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(db.receipts().count_for_shop(shop.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_lines_write_nothing() {
        let (db, _owner, shop) = db_with_shop().await;

        for lines in [
            vec![line("COCA-500", 0, 120)],
            vec![line("COCA-500", 1, 120), line("AGUA-0500", 1, -1)],
            vec![],
        ] {
            let err = create_receipt(&db, &shop, &lines, Some("idem-bad"))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }

        assert_eq!(db.receipts().count_for_shop(shop.id).await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert!(db.idempotency().find_by_key("idem-bad").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_lines_are_rejected() {
        let (db, _owner, shop) = db_with_shop().await;

        for lines in [
            vec![line("X", 4_611_686_018_427_387_904, 0)],
            vec![line("X", 1, 100_000_001)],
        ] {
            let err = create_receipt(&db, &shop, &lines, None).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }

        assert_eq!(db.receipts().count_for_shop(shop.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_key_from_another_shop_conflicts() {
        let (db, owner, shop) = db_with_shop().await;
        let second = db.shops().create(owner.id, "Second Shop").await.unwrap();

        create_receipt(&db, &shop, &[line("COCA-500", 1, 120)], Some("shared"))
            .await
            .unwrap();
        let err = create_receipt(&db, &second, &[line("COCA-500", 1, 120)], Some("shared"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(db.receipts().count_for_shop(second.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lost_race_returns_winner() {
        let (db, _owner, shop) = db_with_shop().await;

        // The winner bound the key between our lookup and our write
        let winner = create_receipt(&db, &shop, &[line("COCA-500", 2, 120)], Some("race"))
            .await
            .unwrap();

        let draft = ReceiptDraft::from_lines(&[line("AGUA-0500", 1, 100)]).unwrap();
        let loser = persist(&db, &shop, &draft, Some("race")).await.unwrap();

        assert_eq!(loser, winner);
        assert_eq!(db.receipts().count_for_shop(shop.id).await.unwrap(), 1);
        // The loser's implicit product was rolled back with its receipt
        assert!(db.products().find_by_sku("AGUA-0500").await.unwrap().is_none());
    }
}
