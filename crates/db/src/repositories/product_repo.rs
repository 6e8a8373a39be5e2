//! Repository for the `products` table.
//!
//! Listing and lookup return [`ProductRow`], the row joined with its
//! category title and promotion discount, so callers can price without a
//! second round trip.

use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ProductListParams, ProductRow, UpdateProduct};

/// Column list for bare `products` queries.
const COLUMNS: &str = "id, category_id, title, slug, description, promotion_id, \
                        price, inventory, created_at, updated_at";

/// Column list for joined queries returning [`ProductRow`].
const JOINED_COLUMNS: &str = "p.id, p.category_id, c.title AS category_title, p.title, p.slug, \
                        p.description, p.promotion_id, pr.discount, p.price, p.inventory, \
                        p.created_at, p.updated_at";

/// Join clause pairing each product with its category and optional promotion.
const JOINS: &str = "FROM products p \
                     JOIN categories c ON c.id = p.category_id \
                     LEFT JOIN promotions pr ON pr.id = p.promotion_id";

/// Default page size for product listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for product listing.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (category_id, title, slug, description, promotion_id, price, inventory)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.promotion_id)
            .bind(input.price)
            .bind(input.inventory)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID (bare row, no joins).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by ID only if it is available (inventory > 0).
    ///
    /// Cart adds gate on this: an out-of-stock product cannot enter a cart.
    pub async fn find_available(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND inventory > 0");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by slug, joined with category and promotion.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE p.slug = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List available products (inventory > 0) with the catalog filters:
    /// category, price bounds, and case-insensitive title prefix search.
    ///
    /// Absent filters are passed as NULL and short-circuit in SQL.
    pub async fn list(
        pool: &PgPool,
        params: &ProductListParams,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        let prefix = params.search.as_ref().map(|s| format!("{s}%"));

        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS}
             WHERE p.inventory > 0
               AND ($1::BIGINT IS NULL OR p.category_id = $1)
               AND ($2::NUMERIC IS NULL OR p.price > $2)
               AND ($3::NUMERIC IS NULL OR p.price < $3)
               AND ($4::TEXT IS NULL OR p.title ILIKE $4)
             ORDER BY p.created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(params.category_id)
            .bind(params.price_gt)
            .bind(params.price_lt)
            .bind(prefix)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a product by slug. Only non-`None` fields in `input` are
    /// applied; the slug itself never changes.
    ///
    /// Returns `None` if no row with the given slug exists.
    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                promotion_id = COALESCE($5, promotion_id),
                price = COALESCE($6, price),
                inventory = COALESCE($7, inventory),
                updated_at = NOW()
             WHERE slug = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.promotion_id)
            .bind(input.price)
            .bind(input.inventory)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by slug. RESTRICTed while cart lines, order lines,
    /// or reviews still reference it, which keeps order history priceable.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of products currently out of stock, for the catalog report.
    pub async fn count_out_of_stock(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE inventory = 0")
            .fetch_one(pool)
            .await
    }
}
