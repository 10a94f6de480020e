//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Shop       │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  owner_id (FK)  │   │  id             │       │
//! │  │  email (unique) │   │  name           │   │  sku (unique)   │       │
//! │  │  password_hash  │   │  (owner,name) ! │   │  name, price    │       │
//! │  └─────────────────┘   └────────┬────────┘   └────────▲────────┘       │
//! │                                 │                     │                 │
//! │  ┌─────────────────┐   ┌────────▼────────┐   ┌────────┴────────┐       │
//! │  │ IdempotencyKey  │──►│     Receipt     │◄──│   ReceiptLine   │       │
//! │  │  key (unique)   │   │  shop_id (FK)   │   │  qty            │       │
//! │  │  receipt_id     │   │  total          │   │  unit_price     │       │
//! │  └─────────────────┘   │  created_at     │   │  (snapshot)     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entities use the database's integer row ids. The product catalog is
//! global: products are shared by every shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Accounts & Shops
// =============================================================================

/// A registered account. Owns zero or more shops.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,

    /// Normalised (trimmed, lower-case) email; unique.
    pub email: String,

    /// PHC-formatted password hash. Never serialized.
    pub password_hash: String,

    /// Inactive users cannot authenticate.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

/// A shop owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub owner_id: i64,

    /// Unique per owner, not globally.
    pub name: String,

    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// Returns true if `user_id` owns this shop.
    #[inline]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product in the shared catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Stock Keeping Unit - business identifier, globally unique.
    pub sku: String,

    /// Display name. Equals the SKU for products created implicitly by a receipt.
    pub name: String,

    /// Catalog price. For implicit products this is the first unit price seen.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: Money,
}

impl NewProduct {
    /// The product implicitly created for an unknown SKU on a receipt line.
    pub fn implicit(sku: &str, unit_price: Money) -> Self {
        NewProduct {
            sku: sku.to_string(),
            name: sku.to_string(),
            price: unit_price,
        }
    }
}

// =============================================================================
// Receipts
// =============================================================================

/// A stored receipt. The total is computed once at creation and never
/// recomputed from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: i64,
    pub shop_id: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "total_cents"))]
    pub total: Money,

    /// Server-assigned; drives every KPI date window.
    pub created_at: DateTime<Utc>,
}

/// A stored receipt line.
///
/// ## Snapshot Pattern
/// `unit_price` is copied from the submission, so the line keeps its
/// historical price even if the product's catalog price differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReceiptLine {
    pub id: i64,
    pub receipt_id: i64,
    pub product_id: i64,
    pub qty: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "unit_price_cents"))]
    pub unit_price: Money,
}

/// One line of a receipt submission, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineInput {
    pub sku: String,
    pub qty: i64,
    pub unit_price: Money,
}

impl ReceiptLineInput {
    pub fn new(sku: impl Into<String>, qty: i64, unit_price: Money) -> Self {
        ReceiptLineInput {
            sku: sku.into(),
            qty,
            unit_price,
        }
    }
}

/// What a receipt submission returns, both for fresh writes and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptResult {
    pub id: i64,
    pub total: Money,
}

impl From<&Receipt> for ReceiptResult {
    fn from(receipt: &Receipt) -> Self {
        ReceiptResult {
            id: receipt.id,
            total: receipt.total,
        }
    }
}

/// A client-supplied idempotency key and the receipt it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct IdempotencyKey {
    pub id: i64,
    pub key: String,
    pub receipt_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// KPIs
// =============================================================================

/// Aggregated figures for one shop over a date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpis {
    pub shop_id: i64,
    pub total_receipts: i64,
    pub total_revenue: Money,

    /// At most [`crate::TOP_SKU_LIMIT`] entries, by summed quantity descending.
    pub top_skus: Vec<TopSku>,
}

/// One entry of the top-N product ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopSku {
    pub sku: String,
    pub name: String,
    pub qty: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "revenue_cents"))]
    pub revenue: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_ownership() {
        let shop = Shop {
            id: 7,
            owner_id: 1,
            name: "Corner".to_string(),
            created_at: Utc::now(),
        };

        assert!(shop.is_owned_by(1));
        assert!(!shop.is_owned_by(2));
    }

    #[test]
    fn test_implicit_product_uses_sku_as_name() {
        let product = NewProduct::implicit("COCA-500", Money::from_cents(120));
        assert_eq!(product.name, "COCA-500");
        assert_eq!(product.sku, "COCA-500");
        assert_eq!(product.price.cents(), 120);
    }
}
