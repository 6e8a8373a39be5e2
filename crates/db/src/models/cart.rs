//! Cart and cart line models, the priced view, and DTOs.

use bazaar_core::pricing;
use bazaar_core::types::{CartId, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `carts` table. The UUID id is the only credential a guest
/// needs to operate on the cart.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: CartId,
    pub created_at: Timestamp,
}

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub cart_id: CartId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with live product pricing data.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineRow {
    pub product_id: DbId,
    pub title: String,
    pub slug: String,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Option<Decimal>,
}

/// One priced line in a cart view. `unit_price` and `price` are computed
/// from the catalog at view time, never cached on the cart.
#[derive(Debug, Serialize)]
pub struct CartLine {
    pub product_id: DbId,
    pub title: String,
    pub slug: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub price: Decimal,
}

/// The full priced view of a cart returned by `GET /cart/{id}`.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub items: Vec<CartLine>,
    pub total_price: Decimal,
}

impl CartView {
    /// Price the raw line rows and sum the total. The displayed total can
    /// change between views if the catalog changes; the price lock happens
    /// at checkout, not here.
    pub fn from_rows(cart: &Cart, rows: Vec<CartLineRow>) -> Self {
        let items: Vec<CartLine> = rows
            .into_iter()
            .map(|row| {
                let unit_price = pricing::final_price(row.price, row.discount);
                CartLine {
                    product_id: row.product_id,
                    title: row.title,
                    slug: row.slug,
                    quantity: row.quantity,
                    unit_price,
                    price: pricing::line_total(unit_price, row.quantity),
                }
            })
            .collect();
        let total_price = items.iter().map(|line| line.price).sum();
        Self {
            id: cart.id,
            items,
            total_price,
        }
    }
}

/// DTO for `POST /cart/{cart_id}/items`. Adding a product already in the
/// cart increments the existing line instead of duplicating it.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItem {
    pub product_id: DbId,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// DTO for `PATCH /cart/{cart_id}/items/{product_id}`. Overwrites the
/// quantity; removing a line is a DELETE, not quantity zero.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
