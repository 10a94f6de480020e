//! # KPI Repository
//!
//! Read-only aggregation over a shop's receipts.
//!
//! ## Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  summary     receipts WHERE shop AND window                            │
//! │              → COUNT(*), COALESCE(SUM(total_cents), 0)                 │
//! │                                                                         │
//! │  top_skus    receipt_lines ⋈ receipts ⋈ products                       │
//! │              WHERE shop AND window                                      │
//! │              GROUP BY product                                           │
//! │              ORDER BY SUM(qty) DESC, product.id ASC                    │
//! │              LIMIT n                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Window bounds are bound as optional parameters; a `NULL` bound leaves
//! that side open. Timestamps are stored as RFC 3339 text in UTC, so the
//! comparisons are plain string comparisons.

use sqlx::SqlitePool;

use crate::error::DbResult;
use tally_core::{DateWindow, Kpis, Money, TopSku, TOP_SKU_LIMIT};

/// Repository for KPI aggregation.
#[derive(Debug, Clone)]
pub struct KpiRepository {
    pool: SqlitePool,
}

impl KpiRepository {
    /// Creates a new KpiRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KpiRepository { pool }
    }

    /// Receipt count and revenue for a shop inside the window.
    pub async fn summary(&self, shop_id: i64, window: &DateWindow) -> DbResult<(i64, Money)> {
        let (count, revenue): (i64, Money) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_cents), 0)
            FROM receipts
            WHERE shop_id = ?1
              AND (?2 IS NULL OR created_at >= ?2)
              AND (?3 IS NULL OR created_at <= ?3)
            "#,
        )
        .bind(shop_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok((count, revenue))
    }

    /// Best-selling products by summed quantity, at most `limit` entries.
    pub async fn top_skus(
        &self,
        shop_id: i64,
        window: &DateWindow,
        limit: u32,
    ) -> DbResult<Vec<TopSku>> {
        let rows = sqlx::query_as::<_, TopSku>(
            r#"
            SELECT
                p.sku AS sku,
                p.name AS name,
                SUM(l.qty) AS qty,
                SUM(l.qty * l.unit_price_cents) AS revenue_cents
            FROM receipt_lines l
            JOIN receipts r ON r.id = l.receipt_id
            JOIN products p ON p.id = l.product_id
            WHERE r.shop_id = ?1
              AND (?2 IS NULL OR r.created_at >= ?2)
              AND (?3 IS NULL OR r.created_at <= ?3)
            GROUP BY p.id, p.sku, p.name
            ORDER BY SUM(l.qty) DESC, p.id ASC
            LIMIT ?4
            "#,
        )
        .bind(shop_id)
        .bind(window.start)
        .bind(window.end)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Full KPI report for a shop.
    pub async fn kpis(&self, shop_id: i64, window: &DateWindow) -> DbResult<Kpis> {
        let (total_receipts, total_revenue) = self.summary(shop_id, window).await?;
        let top_skus = self.top_skus(shop_id, window, TOP_SKU_LIMIT).await?;

        Ok(Kpis {
            shop_id,
            total_receipts,
            total_revenue,
            top_skus,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
