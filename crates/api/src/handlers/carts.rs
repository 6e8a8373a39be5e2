//! Handlers for the `/cart` resource.
//!
//! Carts are anonymous: no authentication is required, and the unguessable
//! cart UUID is the only credential. Pricing in the view is always computed
//! from live catalog state; the price lock happens at checkout.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::{CartId, DbId};
use bazaar_db::models::cart::{AddCartItem, Cart, CartItem, CartView, UpdateCartItem};
use bazaar_db::repositories::{CartRepo, ProductRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/cart
///
/// Create an empty cart and return it, id included. The client keeps the id.
pub async fn create_cart(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Cart>)> {
    let cart = CartRepo::create(&state.pool).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// GET /api/v1/cart/{id}
///
/// The priced view: every line at the product's current final price, plus
/// the running total.
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> AppResult<Json<CartView>> {
    let cart = find_cart(&state, cart_id).await?;
    let rows = CartRepo::line_rows(&state.pool, cart.id).await?;
    Ok(Json(CartView::from_rows(&cart, rows)))
}

/// DELETE /api/v1/cart/{id}
///
/// Explicit cart abandonment. Lines cascade.
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> AppResult<StatusCode> {
    let deleted = CartRepo::delete(&state.pool, cart_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Cart", cart_id)))
    }
}

/// POST /api/v1/cart/{cart_id}/items
///
/// Add a product to the cart. A repeated add merges into the existing line,
/// incrementing its quantity atomically.
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
    Json(input): Json<AddCartItem>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    input.validate()?;
    find_cart(&state, cart_id).await?;

    // Only products with stock may enter a cart, regardless of quantity.
    ProductRepo::find_available(&state.pool, input.product_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Product {} is not available",
                input.product_id
            )))
        })?;

    let item = CartRepo::upsert_item(&state.pool, cart_id, input.product_id, input.quantity).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/cart/{cart_id}/items/{product_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(CartId, DbId)>,
) -> AppResult<Json<CartItem>> {
    find_cart(&state, cart_id).await?;
    let item = CartRepo::find_item(&state.pool, cart_id, product_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("CartItem", product_id)))?;
    Ok(Json(item))
}

/// PATCH /api/v1/cart/{cart_id}/items/{product_id}
///
/// Overwrite the line's quantity. Quantity zero is rejected; use DELETE to
/// drop a line.
pub async fn update_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(CartId, DbId)>,
    Json(input): Json<UpdateCartItem>,
) -> AppResult<Json<CartItem>> {
    input.validate()?;
    find_cart(&state, cart_id).await?;
    let item = CartRepo::set_item_quantity(&state.pool, cart_id, product_id, input.quantity)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("CartItem", product_id)))?;
    Ok(Json(item))
}

/// DELETE /api/v1/cart/{cart_id}/items/{product_id}
///
/// Removing a line that does not exist is 404, matching DELETE-by-id
/// semantics everywhere else in the API.
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(CartId, DbId)>,
) -> AppResult<StatusCode> {
    find_cart(&state, cart_id).await?;
    let removed = CartRepo::remove_item(&state.pool, cart_id, product_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("CartItem", product_id)))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_cart(state: &AppState, cart_id: CartId) -> Result<Cart, AppError> {
    CartRepo::find_by_id(&state.pool, cart_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Cart", cart_id)))
}
