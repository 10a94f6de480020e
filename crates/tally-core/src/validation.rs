//! # Validation Module
//!
//! Input validation utilities for Tally POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── JSON shape and types (deserialization)                            │
//! │  └── Path / query parsing                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: business rule validation                        │
//! │  ├── Lengths, formats, sign of amounts                                 │
//! │  └── Runs before any write                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE constraints (email, sku, shop name per owner, key)         │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("COCA-500").unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_IDEMPOTENCY_KEY_LEN, MAX_LINE_QTY, MAX_PRICE_CENTS, MAX_SKU_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PRODUCT_NAME_LEN: usize = 255;
const MAX_SHOP_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty or blank
/// - At most 64 characters
///
/// ## Returns
/// The trimmed SKU.
pub fn validate_sku(sku: &str) -> ValidationResult<String> {
    required_trimmed("sku", sku, MAX_SKU_LEN)
}

/// Validates a product display name (required, at most 255 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    required_trimmed("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a shop name (required, at most 120 characters).
pub fn validate_shop_name(name: &str) -> ValidationResult<String> {
    required_trimmed("name", name, MAX_SHOP_NAME_LEN)
}

/// Validates and normalises an email address.
///
/// ## Rules
/// - Trimmed and lower-cased before any check
/// - Exactly one `@`, non-empty local part, domain containing a dot
/// - No whitespace, at most 255 characters
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_email;
///
/// assert_eq!(validate_email(" Ana@Example.COM ").unwrap(), "ana@example.com");
/// assert!(validate_email("ana.example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = required_trimmed("email", email, MAX_EMAIL_LEN)?.to_lowercase();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    let domain_ok = domain
        .split('.')
        .all(|label| !label.is_empty())
        && domain.contains('.');
    if !domain_ok {
        return Err(invalid("must look like name@domain.tld"));
    }

    Ok(email)
}

/// Validates a password before hashing.
///
/// ## Rules
/// - Between 8 and 128 characters
///
/// The password itself never appears in the error.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Normalises an `Idempotency-Key` header value.
///
/// An absent or blank header means "no key". Otherwise the trimmed key must
/// be at most 64 characters.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_idempotency_key;
///
/// assert_eq!(validate_idempotency_key(None).unwrap(), None);
/// assert_eq!(validate_idempotency_key(Some("  ")).unwrap(), None);
/// assert_eq!(
///     validate_idempotency_key(Some("idem-1")).unwrap().as_deref(),
///     Some("idem-1")
/// );
/// ```
pub fn validate_idempotency_key(key: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(key) = key.map(str::trim).filter(|k| !k.is_empty()) else {
        return Ok(None);
    };

    if key.chars().count() > MAX_IDEMPOTENCY_KEY_LEN {
        return Err(ValidationError::TooLong {
            field: "Idempotency-Key".to_string(),
            max: MAX_IDEMPOTENCY_KEY_LEN,
        });
    }

    Ok(Some(key.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a receipt line quantity.
///
/// ## Rules
/// - Must be > 0
/// - At most [`MAX_LINE_QTY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    if qty > MAX_LINE_QTY {
        return Err(ValidationError::TooLarge {
            field: "qty".to_string(),
            max: MAX_LINE_QTY.to_string(),
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free items).
///
/// Prices above [`MAX_PRICE_CENTS`] are rejected, which keeps every line
/// total and every per-shop sum far inside the integer money range.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(0)).is_ok());
/// assert!(validate_price("price", Money::from_cents(-100)).is_err());
/// assert!(validate_price("price", Money::from_cents(100_000_001)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn required_trimmed(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
