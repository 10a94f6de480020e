//! KPI reports for a single shop.

use tally_core::{DateWindow, Kpis, User};
use tally_db::Database;
use tracing::debug;

use crate::error::ApiError;
use crate::services::shop_service::ensure_shop_owner;

/// Receipt count, revenue and best sellers of `shop_id` between the
/// optional `YYYY-MM-DD` bounds (both inclusive, UTC days).
pub async fn get_kpis(
    db: &Database,
    user: &User,
    shop_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Kpis, ApiError> {
    let shop = ensure_shop_owner(db, shop_id, user).await?;
    let window = DateWindow::parse(from, to)?;

    let kpis = db.kpis().kpis(shop.id, &window).await?;

    debug!(
        shop_id = shop.id,
        receipts = kpis.total_receipts,
        revenue = %kpis.total_revenue,
        "KPIs computed"
    );

    Ok(kpis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_support::{db_with_shop, user};
    use tally_core::{Money, ReceiptDraft, ReceiptLineInput};

    #[tokio::test]
    async fn test_kpis_for_owner() {
        let (db, owner, shop) = db_with_shop().await;
        let draft = ReceiptDraft::from_lines(&[ReceiptLineInput::new(
            "COCA-500",
            2,
            Money::from_cents(120),
        )])
        .unwrap();
        db.receipts().create(shop.id, &draft, None).await.unwrap();

        let kpis = get_kpis(&db, &owner, shop.id, None, None).await.unwrap();

        assert_eq!(kpis.shop_id, shop.id);
        assert_eq!(kpis.total_receipts, 1);
        assert_eq!(kpis.total_revenue.cents(), 240);
    }

    #[tokio::test]
    async fn test_guard_runs_before_date_parsing() {
        let (db, owner, shop) = db_with_shop().await;
        let stranger = user(&db, "stranger@example.com").await;

        let err = get_kpis(&db, &stranger, shop.id, Some("garbage"), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = get_kpis(&db, &owner, shop.id, Some("garbage"), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_empty_bounds_count_as_absent() {
        let (db, owner, shop) = db_with_shop().await;

        let kpis = get_kpis(&db, &owner, shop.id, Some(""), Some("")).await.unwrap();
        assert_eq!(kpis.total_receipts, 0);
        assert!(kpis.top_skus.is_empty());
    }
}
