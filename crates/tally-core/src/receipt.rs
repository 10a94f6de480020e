//! # Receipt Drafting
//!
//! Turns a raw receipt submission into a validated [`ReceiptDraft`] whose
//! total is ready to be persisted.
//!
//! ## Intake Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /shops/{id}/receipts  {lines: [{sku, qty, unit_price}, ...]}      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptDraft::from_lines ← THIS MODULE (pure, no I/O)                  │
//! │       │                                                                 │
//! │       ├── no lines?            → CoreError::EmptyReceipt               │
//! │       ├── qty <= 0 or too big? → CoreError::InvalidLine                │
//! │       ├── price < 0 or too big?→ CoreError::InvalidLine                │
//! │       ├── bad sku?             → CoreError::Validation                 │
//! │       ├── overflow?            → CoreError::AmountOverflow             │
//! │       │                                                                 │
//! │       └── OK → total = Σ qty × unit_price                              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  tally-db: resolve products, insert receipt + lines (one transaction)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation finishes for every line before anything touches storage, so
//! an invalid submission never leaves a partial write behind.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ReceiptLineInput;
use crate::validation::{validate_price, validate_quantity, validate_sku};

/// A validated receipt line with its computed line total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    pub sku: String,
    pub qty: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A validated receipt, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDraft {
    lines: Vec<DraftLine>,
    total: Money,
}

impl ReceiptDraft {
    /// Validates every line and accumulates the receipt total.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::receipt::ReceiptDraft;
    /// use tally_core::types::ReceiptLineInput;
    ///
    /// let draft = ReceiptDraft::from_lines(&[
    ///     ReceiptLineInput::new("COCA-500", 2, Money::from_cents(120)),
    /// ])
    /// .unwrap();
    /// assert_eq!(draft.total().cents(), 240);
    ///
    /// let bad = ReceiptDraft::from_lines(&[
    ///     ReceiptLineInput::new("COCA-500", 0, Money::from_cents(120)),
    /// ]);
    /// assert!(bad.is_err());
    /// ```
    pub fn from_lines(inputs: &[ReceiptLineInput]) -> CoreResult<Self> {
        if inputs.is_empty() {
            return Err(CoreError::EmptyReceipt);
        }

        let mut lines = Vec::with_capacity(inputs.len());
        let mut total = Money::zero();

        for input in inputs {
            let sku = validate_sku(&input.sku)?;

            validate_quantity(input.qty).map_err(|e| CoreError::InvalidLine {
                sku: sku.clone(),
                reason: e.to_string(),
            })?;
            validate_price("unit_price", input.unit_price).map_err(|e| {
                CoreError::InvalidLine {
                    sku: sku.clone(),
                    reason: e.to_string(),
                }
            })?;

            let line_total = input.unit_price.checked_mul_qty(input.qty).ok_or_else(|| {
                CoreError::AmountOverflow {
                    context: format!("line total for {sku}"),
                }
            })?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| CoreError::AmountOverflow {
                    context: "receipt total".to_string(),
                })?;

            lines.push(DraftLine {
                sku,
                qty: input.qty,
                unit_price: input.unit_price,
                line_total,
            });
        }

        Ok(ReceiptDraft { lines, total })
    }

    /// The validated lines, in submission order.
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Σ qty × unit_price over all lines.
    pub fn total(&self) -> Money {
        self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sku: &str, qty: i64, cents: i64) -> ReceiptLineInput {
        ReceiptLineInput::new(sku, qty, Money::from_cents(cents))
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let draft = ReceiptDraft::from_lines(&[
            line("COCA-500", 2, 120),
            line("AGUA-0500", 1, 100),
            line("PAN", 3, 0),
        ])
        .unwrap();

        assert_eq!(draft.total().cents(), 340);
        assert_eq!(draft.lines().len(), 3);
        assert_eq!(draft.lines()[0].line_total.cents(), 240);
        assert_eq!(draft.lines()[2].line_total.cents(), 0);
    }

    #[test]
    fn test_same_sku_on_several_lines_is_kept_apart() {
        let draft =
            ReceiptDraft::from_lines(&[line("COCA-500", 1, 120), line("COCA-500", 1, 110)])
                .unwrap();

        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.total().cents(), 230);
    }

    #[test]
    fn test_rejects_empty_receipt() {
        assert!(matches!(
            ReceiptDraft::from_lines(&[]),
            Err(CoreError::EmptyReceipt)
        ));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let err = ReceiptDraft::from_lines(&[line("COCA-500", 0, 120)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { ref sku, .. } if sku == "COCA-500"));

        let err = ReceiptDraft::from_lines(&[line("COCA-500", -3, 120)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { .. }));
    }

    #[test]
    fn test_rejects_negative_price_even_after_valid_lines() {
        let err = ReceiptDraft::from_lines(&[line("COCA-500", 1, 120), line("AGUA", 1, -100)])
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { ref sku, .. } if sku == "AGUA"));
    }

    #[test]
    fn test_rejects_blank_sku() {
        let err = ReceiptDraft::from_lines(&[line("  ", 1, 120)]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_oversized_quantity_and_price() {
        let err = ReceiptDraft::from_lines(&[line("BIG", 4_611_686_018_427_387_904, 100)])
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { ref sku, .. } if sku == "BIG"));

        let err = ReceiptDraft::from_lines(&[line("BIG", 2, i64::MAX)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { .. }));
    }

    #[test]
    fn test_largest_accepted_line() {
        let draft = ReceiptDraft::from_lines(&[
            line("BIG", crate::MAX_LINE_QTY, crate::MAX_PRICE_CENTS),
            line("BIG", crate::MAX_LINE_QTY, crate::MAX_PRICE_CENTS),
        ])
        .unwrap();
        assert_eq!(draft.total().cents(), 2_000_000_000_000);
    }
}
