//! Repository for the `promotions` table.

use bazaar_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::promotion::{Promotion, PromotionProductCount};

const COLUMNS: &str = "id, discount, created_at, updated_at";

/// Provides CRUD operations for promotions.
pub struct PromotionRepo;

impl PromotionRepo {
    /// Insert a new promotion, returning the created row.
    pub async fn create(pool: &PgPool, discount: Decimal) -> Result<Promotion, sqlx::Error> {
        let query = format!(
            "INSERT INTO promotions (discount)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(discount)
            .fetch_one(pool)
            .await
    }

    /// Find a promotion by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions WHERE id = $1");
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all promotions ordered by discount.
    pub async fn list(pool: &PgPool) -> Result<Vec<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions ORDER BY discount");
        sqlx::query_as::<_, Promotion>(&query).fetch_all(pool).await
    }

    /// Overwrite a promotion's discount.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        discount: Decimal,
    ) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!(
            "UPDATE promotions SET discount = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .bind(discount)
            .fetch_optional(pool)
            .await
    }

    /// Delete a promotion. Products referencing it fall back to their
    /// undiscounted price (`ON DELETE SET NULL`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All promotions annotated with their product count, for the operator
    /// catalog report.
    pub async fn list_with_product_counts(
        pool: &PgPool,
    ) -> Result<Vec<PromotionProductCount>, sqlx::Error> {
        sqlx::query_as::<_, PromotionProductCount>(
            "SELECT pr.id, pr.discount, COUNT(p.id) AS product_count
             FROM promotions pr
             LEFT JOIN products p ON p.promotion_id = pr.id
             GROUP BY pr.id, pr.discount
             ORDER BY pr.discount",
        )
        .fetch_all(pool)
        .await
    }
}
