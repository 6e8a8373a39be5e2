//! Repository for the `product_covers` table.
//!
//! All operations are scoped by `product_id`, mirroring the nested
//! `/products/{slug}/covers/{id}` route shape.

use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::product_cover::ProductCover;

const COLUMNS: &str = "id, product_id, image_url, created_at";

/// Provides CRUD operations for product cover images.
pub struct ProductCoverRepo;

impl ProductCoverRepo {
    /// Attach a cover image to a product.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        image_url: &str,
    ) -> Result<ProductCover, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_covers (product_id, image_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductCover>(&query)
            .bind(product_id)
            .bind(image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a cover by ID within a product's scope.
    pub async fn find_by_id(
        pool: &PgPool,
        product_id: DbId,
        id: DbId,
    ) -> Result<Option<ProductCover>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_covers WHERE id = $1 AND product_id = $2");
        sqlx::query_as::<_, ProductCover>(&query)
            .bind(id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// List all covers for a product, oldest first.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductCover>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_covers WHERE product_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProductCover>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a cover's image URL.
    ///
    /// Returns `None` if the cover does not exist under this product.
    pub async fn update(
        pool: &PgPool,
        product_id: DbId,
        id: DbId,
        image_url: &str,
    ) -> Result<Option<ProductCover>, sqlx::Error> {
        let query = format!(
            "UPDATE product_covers SET image_url = $3
             WHERE id = $1 AND product_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductCover>(&query)
            .bind(id)
            .bind(product_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a cover. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, product_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_covers WHERE id = $1 AND product_id = $2")
            .bind(id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
