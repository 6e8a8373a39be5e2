//! Repository for the `orders` and `order_items` tables, including the
//! checkout transaction that converts a cart into an order.

use bazaar_core::pricing;
use bazaar_core::types::{CartId, DbId};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::cart::CartLineRow;
use crate::models::order::{Order, OrderDetail, OrderLine, OrderStats};

const COLUMNS: &str = "id, customer_id, is_delivered, created_at";

/// Column list for order lines joined with their product.
const LINE_COLUMNS: &str = "oi.product_id, p.title, p.slug, oi.quantity, oi.price";

/// Failure modes of [`OrderRepo::checkout`]. The first two are business-rule
/// rejections the API maps to 404 and 400; anything else is a database error.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides checkout and read operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Atomically convert a cart into an order owned by `customer_id`.
    ///
    /// Inside one transaction: lock the cart row, read its lines joined
    /// with the product and promotion rows in effect right now, create the
    /// order, bulk-insert the order lines with their totals frozen at the
    /// current promotion-adjusted price, and delete the cart. Any failure
    /// rolls the whole transaction back, leaving the cart intact and
    /// retryable.
    pub async fn checkout(
        pool: &PgPool,
        cart_id: CartId,
        customer_id: DbId,
    ) -> Result<OrderDetail, CheckoutError> {
        let mut tx = pool.begin().await?;

        // Lock the cart so two concurrent checkouts of the same cart cannot
        // both materialize an order from it.
        let cart_lock = sqlx::query_scalar::<_, i32>("SELECT 1 FROM carts WHERE id = $1 FOR UPDATE")
            .bind(cart_id)
            .fetch_optional(&mut *tx)
            .await?;
        if cart_lock.is_none() {
            return Err(CheckoutError::CartNotFound);
        }

        let lines = sqlx::query_as::<_, CartLineRow>(
            "SELECT ci.product_id, p.title, p.slug, ci.quantity, p.price, pr.discount
             FROM cart_items ci
             JOIN products p ON p.id = ci.product_id
             LEFT JOIN promotions pr ON pr.id = p.promotion_id
             WHERE ci.cart_id = $1
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let query = format!("INSERT INTO orders (customer_id) VALUES ($1) RETURNING {COLUMNS}");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .fetch_one(&mut *tx)
            .await?;

        // Freeze each line total at the promotion-adjusted price read above,
        // within this transaction's snapshot.
        let items: Vec<OrderLine> = lines
            .into_iter()
            .map(|line| {
                let unit_price = pricing::final_price(line.price, line.discount);
                OrderLine {
                    product_id: line.product_id,
                    title: line.title,
                    slug: line.slug,
                    quantity: line.quantity,
                    price: pricing::line_total(unit_price, line.quantity),
                }
            })
            .collect();

        let product_ids: Vec<DbId> = items.iter().map(|l| l.product_id).collect();
        let quantities: Vec<i32> = items.iter().map(|l| l.quantity).collect();
        let prices: Vec<Decimal> = items.iter().map(|l| l.price).collect();

        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, price)
             SELECT $1, line.product_id, line.quantity, line.price
             FROM UNNEST($2::BIGINT[], $3::INT[], $4::NUMERIC[])
                  AS line (product_id, quantity, price)",
        )
        .bind(order.id)
        .bind(&product_ids)
        .bind(&quantities)
        .bind(&prices)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            order_id = order.id,
            customer_id,
            lines = items.len(),
            "Checkout committed"
        );

        Ok(OrderDetail::new(order, items))
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// An order's lines joined with product titles, in insertion order.
    pub async fn lines(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS}
             FROM order_items oi
             JOIN products p ON p.id = oi.product_id
             WHERE oi.order_id = $1
             ORDER BY oi.id"
        );
        sqlx::query_as::<_, OrderLine>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Find an order with its lines and total.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<OrderDetail>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::lines(pool, id).await?;
        Ok(Some(OrderDetail::new(order, items)))
    }

    /// All orders, newest first (operator view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// A customer's own orders, newest first.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Flip the delivery flag, the only mutation an order ever receives.
    ///
    /// Returns `None` if no order with the given `id` exists.
    pub async fn set_delivered(
        pool: &PgPool,
        id: DbId,
        is_delivered: bool,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET is_delivered = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(is_delivered)
            .fetch_optional(pool)
            .await
    }

    /// Order counts and revenue, for the operator report.
    pub async fn stats(pool: &PgPool) -> Result<OrderStats, sqlx::Error> {
        sqlx::query_as::<_, OrderStats>(
            "SELECT
                 (SELECT COUNT(*) FROM orders) AS total_orders,
                 (SELECT COUNT(*) FROM orders WHERE is_delivered = FALSE) AS undelivered_orders,
                 (SELECT COALESCE(SUM(price), 0) FROM order_items) AS total_revenue",
        )
        .fetch_one(pool)
        .await
    }
}
