//! Order models and DTOs.
//!
//! Orders are written once by the checkout transaction; the only field that
//! ever changes afterwards is `is_delivered`.

use bazaar_core::types::{CartId, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `orders` table. `customer_id` is `None` once the owning
/// customer has been deleted; the order itself survives.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_id: Option<DbId>,
    pub is_delivered: bool,
    pub created_at: Timestamp,
}

/// An order line joined with its product title. `price` is the line total
/// frozen at checkout, independent of later catalog changes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderLine {
    pub product_id: DbId,
    pub title: String,
    pub slug: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Order with its lines and total, for confirmation and detail display.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub id: DbId,
    pub customer_id: Option<DbId>,
    pub is_delivered: bool,
    pub created_at: Timestamp,
    pub items: Vec<OrderLine>,
    pub total_price: Decimal,
}

impl OrderDetail {
    pub fn new(order: Order, items: Vec<OrderLine>) -> Self {
        let total_price = items.iter().map(|line| line.price).sum();
        Self {
            id: order.id,
            customer_id: order.customer_id,
            is_delivered: order.is_delivered,
            created_at: order.created_at,
            items,
            total_price,
        }
    }
}

/// Aggregate order figures for the operator report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub undelivered_orders: i64,
    pub total_revenue: Decimal,
}

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub cart_id: CartId,
}

/// Request body for the operator delivery-flag update.
#[derive(Debug, Deserialize)]
pub struct UpdateDelivery {
    pub is_delivered: bool,
}
