//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It contains the business rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /auth, /shops, /products, /shops/{id}/receipts, /kpis       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  receipt  │  │ validation│  │   │
//! │  │   │  Shop     │  │   Money   │  │  Draft    │  │   rules   │  │   │
//! │  │   │  Receipt  │  │  cents    │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐                             │   │
//! │  │                       │  window   │  KPI date ranges            │   │
//! │  │                       └───────────┘                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Shop, Product, Receipt, Kpis, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Receipt drafting: line validation and totals
//! - [`window`] - Calendar-day windows for KPI filtering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::receipt::ReceiptDraft;
//! use tally_core::types::ReceiptLineInput;
//!
//! let draft = ReceiptDraft::from_lines(&[
//!     ReceiptLineInput::new("COCA-500", 2, Money::from_cents(120)),
//!     ReceiptLineInput::new("AGUA-0500", 1, Money::from_cents(100)),
//! ])
//! .unwrap();
//!
//! assert_eq!(draft.total().cents(), 340);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;
pub mod window;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use receipt::{DraftLine, ReceiptDraft};
pub use types::*;
pub use window::DateWindow;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products reported in the KPI ranking.
pub const TOP_SKU_LIMIT: u32 = 5;

/// Maximum length of a SKU (matches the `products.sku` column contract).
pub const MAX_SKU_LEN: usize = 64;

/// Maximum length of a client-supplied idempotency key.
pub const MAX_IDEMPOTENCY_KEY_LEN: usize = 64;

/// Largest quantity accepted on a single receipt line.
pub const MAX_LINE_QTY: i64 = 10_000;

/// Largest unit or catalog price accepted, in cents (1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
