//! Product cover image model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `product_covers` table. Covers are owned by their product
/// and cascade-deleted with it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductCover {
    pub id: DbId,
    pub product_id: DbId,
    pub image_url: String,
    pub created_at: Timestamp,
}

/// DTO for attaching a cover image to a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductCover {
    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,
}

/// DTO for replacing a cover image.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductCover {
    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,
}
