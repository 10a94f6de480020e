//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service (apps/api)                                                    │
//! │       │                                                                 │
//! │       │  db.receipts().create(shop_id, &draft, key)                    │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── create(&self, shop_id, draft, key)   ← one transaction            │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── lines(&self, receipt_id)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Accounts
//! - [`shop::ShopRepository`] - Shops (tenants)
//! - [`product::ProductRepository`] - Shared product catalog
//! - [`receipt::ReceiptRepository`] - Transactional receipt writes
//! - [`idempotency::IdempotencyRepository`] - Idempotency key lookups
//! - [`kpi::KpiRepository`] - Read-only KPI aggregation

pub mod idempotency;
pub mod kpi;
pub mod product;
pub mod receipt;
pub mod shop;
pub mod user;
