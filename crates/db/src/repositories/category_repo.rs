//! Repository for the `categories` table.

use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryProductCount, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, is_active, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (title, is_active)
             VALUES ($1, COALESCE($2, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.title)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by title. Inactive ones are included only
    /// when requested (operator views).
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE is_active = TRUE OR $1
             ORDER BY title"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                title = COALESCE($2, title),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Fails with a foreign-key violation while any
    /// product still references it; the caller surfaces that as a conflict.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All categories annotated with their product count, for the operator
    /// catalog report.
    pub async fn list_with_product_counts(
        pool: &PgPool,
    ) -> Result<Vec<CategoryProductCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryProductCount>(
            "SELECT c.id, c.title, c.is_active, COUNT(p.id) AS product_count
             FROM categories c
             LEFT JOIN products p ON p.category_id = c.id
             GROUP BY c.id, c.title, c.is_active
             ORDER BY c.title",
        )
        .fetch_all(pool)
        .await
    }
}
