//! Shared product catalog.

use tally_core::validation::{validate_price, validate_product_name, validate_sku};
use tally_core::{Money, NewProduct, Product};
use tally_db::Database;
use tracing::info;

use crate::error::ApiError;

/// Registers a product, or returns the stored one if the SKU already exists.
///
/// The boolean is `true` when a new row was inserted. An existing product
/// is returned unchanged; its name and price are not updated.
pub async fn create_product(
    db: &Database,
    sku: &str,
    name: &str,
    price: Money,
) -> Result<(Product, bool), ApiError> {
    let new = NewProduct {
        sku: validate_sku(sku)?,
        name: validate_product_name(name)?,
        price,
    };
    validate_price("price", new.price)?;

    let (product, created) = db.products().create_or_get(&new).await?;

    if created {
        info!(product_id = product.id, sku = %product.sku, "Product created");
    }

    Ok((product, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_support::test_db;

    #[tokio::test]
    async fn test_existing_sku_is_returned_unchanged() {
        let db = test_db().await;

        let (first, created) = create_product(&db, "COCA-500", "Coca-Cola 500ml", Money::from_cents(120))
            .await
            .unwrap();
        assert!(created);

        let (second, created) = create_product(&db, "COCA-500", "Renamed", Money::from_cents(999))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second, first);
        assert_eq!(second.name, "Coca-Cola 500ml");
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected() {
        let db = test_db().await;

        let err = create_product(&db, "COCA-500", "Coca", Money::from_cents(-1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let long_sku = "X".repeat(65);
        let err = create_product(&db, &long_sku, "Coca", Money::from_cents(1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
