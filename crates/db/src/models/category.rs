//! Category model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category reference embedded in product responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: DbId,
    pub title: String,
}

/// DTO for creating a new category. Categories start inactive unless stated.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub is_active: Option<bool>,
}

/// DTO for updating a category. Only non-`None` fields are applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub is_active: Option<bool>,
}

/// Category with the number of products referencing it, for the operator
/// catalog report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryProductCount {
    pub id: DbId,
    pub title: String,
    pub is_active: bool,
    pub product_count: i64,
}
