//! Shop registry and the ownership guard.

use tally_core::validation::validate_shop_name;
use tally_core::{Shop, User};
use tally_db::Database;
use tracing::{info, warn};

use crate::error::ApiError;

/// Creates a shop owned by `owner`.
///
/// Names are unique per owner; a second shop with the same name is a
/// `Conflict`.
pub async fn create_shop(db: &Database, owner: &User, name: &str) -> Result<Shop, ApiError> {
    let name = validate_shop_name(name)?;

    let shop = db.shops().create(owner.id, &name).await.map_err(|e| {
        if e.is_duplicate_of("shop_name") {
            ApiError::conflict("You already have a shop with this name")
        } else {
            e.into()
        }
    })?;

    info!(shop_id = shop.id, owner_id = owner.id, "Shop created");
    Ok(shop)
}

/// Loads a shop and checks that `user` owns it.
///
/// Runs before every shop-scoped read and write.
pub async fn ensure_shop_owner(db: &Database, shop_id: i64, user: &User) -> Result<Shop, ApiError> {
    let shop = db
        .shops()
        .get_by_id(shop_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Shop not found"))?;

    if !shop.is_owned_by(user.id) {
        warn!(shop_id, user_id = user.id, "Access to foreign shop denied");
        return Err(ApiError::forbidden("You are not the owner of this shop"));
    }

    Ok(shop)
}
