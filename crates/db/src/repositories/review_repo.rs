//! Repository for the `reviews` table.
//!
//! Covers creation, role-gated listing, the operator visibility toggle, and
//! the retention sweep's stale-review queries.

use bazaar_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithAuthor, StaleReview};

const COLUMNS: &str = "id, user_id, product_id, description, recommendation, is_visible, created_at";

/// Column list for listings joined with the author's username.
const AUTHOR_COLUMNS: &str = "r.id, u.username, r.product_id, r.description, r.recommendation, \
                        r.is_visible, r.created_at";

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review. Reviews always start hidden; only an operator
    /// makes them visible.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, product_id, description, recommendation)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(product_id)
            .bind(&input.description)
            .bind(input.recommendation)
            .fetch_one(pool)
            .await
    }

    /// List a product's reviews, newest first. Hidden reviews are included
    /// only when requested (operator callers).
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
        include_hidden: bool,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.product_id = $1 AND (r.is_visible = TRUE OR $2)
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .bind(product_id)
            .bind(include_hidden)
            .fetch_all(pool)
            .await
    }

    /// Flip a review's visibility within a product's scope.
    ///
    /// Returns `None` if the review does not exist under this product.
    pub async fn set_visibility(
        pool: &PgPool,
        product_id: DbId,
        id: DbId,
        is_visible: bool,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_visible = $3
             WHERE id = $1 AND product_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(product_id)
            .bind(is_visible)
            .fetch_optional(pool)
            .await
    }

    /// The moderation queue: all hidden reviews, oldest first so the ones
    /// closest to the retention cutoff surface at the top.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.is_visible = FALSE
             ORDER BY r.created_at"
        );
        sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .fetch_all(pool)
            .await
    }

    /// Hidden reviews created before `cutoff`, with the author's email for
    /// the pre-deletion warning.
    pub async fn find_stale_hidden(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<StaleReview>, sqlx::Error> {
        sqlx::query_as::<_, StaleReview>(
            "SELECT r.id, u.email, u.username
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.is_visible = FALSE AND r.created_at < $1
             ORDER BY r.id",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Delete the given reviews. Returns the number of rows removed.
    pub async fn delete_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
