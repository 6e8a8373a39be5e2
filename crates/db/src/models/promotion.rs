//! Promotion model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `promotions` table. `discount` is a fraction in `[0, 1)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Promotion {
    pub id: DbId,
    pub discount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a promotion. The discount range is validated in the
/// handler via `bazaar_core::pricing::validate_discount`.
#[derive(Debug, Deserialize)]
pub struct CreatePromotion {
    pub discount: Decimal,
}

/// DTO for updating a promotion.
#[derive(Debug, Deserialize)]
pub struct UpdatePromotion {
    pub discount: Option<Decimal>,
}

/// Promotion with the number of products attached, for the operator catalog
/// report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromotionProductCount {
    pub id: DbId,
    pub discount: Decimal,
    pub product_count: i64,
}
