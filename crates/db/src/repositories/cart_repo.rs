//! Repository for the `carts` and `cart_items` tables.

use bazaar_core::types::{CartId, DbId, Timestamp};
use sqlx::PgPool;

use crate::models::cart::{Cart, CartItem, CartLineRow};

const CART_COLUMNS: &str = "id, created_at";

const ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, created_at, updated_at";

/// Provides operations for carts and their lines.
pub struct CartRepo;

impl CartRepo {
    /// Persist a new empty cart with a server-generated UUID.
    pub async fn create(pool: &PgPool) -> Result<Cart, sqlx::Error> {
        let query = format!("INSERT INTO carts DEFAULT VALUES RETURNING {CART_COLUMNS}");
        sqlx::query_as::<_, Cart>(&query).fetch_one(pool).await
    }

    /// Find a cart by its UUID.
    pub async fn find_by_id(pool: &PgPool, id: CartId) -> Result<Option<Cart>, sqlx::Error> {
        let query = format!("SELECT {CART_COLUMNS} FROM carts WHERE id = $1");
        sqlx::query_as::<_, Cart>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a cart and, by cascade, all of its lines.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: CartId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `quantity` of a product to a cart, merging into the existing line
    /// when one exists.
    ///
    /// The upsert is a single statement, so concurrent adds to the same
    /// (cart, product) pair serialize on the row and no increment is lost.
    pub async fn upsert_item(
        pool: &PgPool,
        cart_id: CartId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                           updated_at = NOW()
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Overwrite a line's quantity.
    ///
    /// Returns `None` if the cart has no line for this product.
    pub async fn set_item_quantity(
        pool: &PgPool,
        cart_id: CartId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET quantity = $3, updated_at = NOW()
             WHERE cart_id = $1 AND product_id = $2
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Find a single line by its (cart, product) pair.
    pub async fn find_item(
        pool: &PgPool,
        cart_id: CartId,
        product_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 AND product_id = $2"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a line. Returns `true` if a row was deleted; the handler
    /// treats `false` as not-found.
    pub async fn remove_item(
        pool: &PgPool,
        cart_id: CartId,
        product_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A cart's lines joined with live product pricing, in insertion order.
    pub async fn line_rows(pool: &PgPool, cart_id: CartId) -> Result<Vec<CartLineRow>, sqlx::Error> {
        sqlx::query_as::<_, CartLineRow>(
            "SELECT ci.product_id, p.title, p.slug, ci.quantity, p.price, pr.discount
             FROM cart_items ci
             JOIN products p ON p.id = ci.product_id
             LEFT JOIN promotions pr ON pr.id = p.promotion_id
             WHERE ci.cart_id = $1
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(pool)
        .await
    }

    /// Delete abandoned carts created before `cutoff`. Lines cascade.
    ///
    /// Returns the number of carts removed.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carts WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
