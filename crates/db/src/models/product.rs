//! Product model, joined query rows, and DTOs.

use bazaar_core::pricing;
use bazaar_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::CategoryInfo;
use crate::models::product_cover::ProductCover;

/// A bare row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub promotion_id: Option<DbId>,
    pub price: Decimal,
    pub inventory: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product row joined with its category title and promotion discount, so
/// the final price can be computed without further queries.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub category_id: DbId,
    pub category_title: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub promotion_id: Option<DbId>,
    pub discount: Option<Decimal>,
    pub price: Decimal,
    pub inventory: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRow {
    /// The promotion-adjusted unit price a buyer pays right now.
    pub fn final_price(&self) -> Decimal {
        pricing::final_price(self.price, self.discount)
    }
}

/// External representation of a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: CategoryInfo,
    pub discount: Option<Decimal>,
    pub price: Decimal,
    pub final_price: Decimal,
    pub inventory: i32,
    pub images: Vec<ProductCover>,
    pub created_at: Timestamp,
}

impl ProductResponse {
    pub fn from_row(row: ProductRow, images: Vec<ProductCover>) -> Self {
        let final_price = row.final_price();
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            category: CategoryInfo {
                id: row.category_id,
                title: row.category_title,
            },
            discount: row.discount,
            price: row.price,
            final_price,
            inventory: row.inventory,
            images,
            created_at: row.created_at,
        }
    }
}

/// Compact product representation for listings; detail views use
/// [`ProductResponse`].
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub category: CategoryInfo,
    pub price: Decimal,
    pub final_price: Decimal,
    pub inventory: i32,
}

impl From<ProductRow> for ProductSummary {
    fn from(row: ProductRow) -> Self {
        let final_price = row.final_price();
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            category: CategoryInfo {
                id: row.category_id,
                title: row.category_title,
            },
            price: row.price,
            final_price,
            inventory: row.inventory,
        }
    }
}

/// DTO for creating a product. The slug and positive price are validated in
/// the handler (`bazaar_core::slug`, price > 0).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProduct {
    pub category_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub promotion_id: Option<DbId>,
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub inventory: i32,
}

/// DTO for updating a product. Only non-`None` fields are applied; the slug
/// itself is immutable once created.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProduct {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub promotion_id: Option<DbId>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub inventory: Option<i32>,
}

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub category_id: Option<DbId>,
    pub price_gt: Option<Decimal>,
    pub price_lt: Option<Decimal>,
    /// Title prefix match, case-insensitive.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
