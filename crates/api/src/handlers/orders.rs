//! Handlers for the `/orders` resource.
//!
//! Checkout is the one state transition that matters: it converts a cart
//! into an immutable order inside a single database transaction. After
//! that, only the delivery flag ever changes, and only forward.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::customer::Customer;
use bazaar_db::models::order::{CheckoutRequest, Order, OrderDetail, UpdateDelivery};
use bazaar_db::repositories::{CustomerRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOperator};
use crate::state::AppState;

/// POST /api/v1/orders (authenticated)
///
/// Place an order from the cart named in the body. On success the cart is
/// gone and the returned order carries the frozen line prices. On any
/// failure the cart is left intact and the call is retryable.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let customer = resolve_customer(&state, &user).await?;
    let detail = OrderRepo::checkout(&state.pool, input.cart_id, customer.id).await?;
    tracing::info!(
        order_id = detail.id,
        customer_id = customer.id,
        lines = detail.items.len(),
        "Order placed"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/orders (authenticated)
///
/// Operators see every order; customers see their own.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<Order>>> {
    if user.is_operator() {
        return Ok(Json(OrderRepo::list_all(&state.pool).await?));
    }
    let Some(customer) = CustomerRepo::find_by_user_id(&state.pool, user.user_id).await? else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        OrderRepo::list_by_customer(&state.pool, customer.id).await?,
    ))
}

/// GET /api/v1/orders/{id} (owner or operator)
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderDetail>> {
    let detail = OrderRepo::detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Order", id)))?;

    if !user.is_operator() {
        let customer = CustomerRepo::find_by_user_id(&state.pool, user.user_id).await?;
        let owns_order = customer
            .map(|c| detail.customer_id == Some(c.id))
            .unwrap_or(false);
        if !owns_order {
            return Err(AppError::Core(CoreError::Forbidden(
                "You may only view your own orders".into(),
            )));
        }
    }

    Ok(Json(detail))
}

/// PATCH /api/v1/orders/{id} (operator only)
///
/// The order state machine has exactly one legal transition, Placed to
/// Delivered; there is no way back.
pub async fn update_delivery(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDelivery>,
) -> AppResult<Json<Order>> {
    if !input.is_delivered {
        return Err(AppError::Core(CoreError::Validation(
            "A delivered order cannot return to undelivered".into(),
        )));
    }
    let order = OrderRepo::set_delivered(&state.pool, id, true)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Order", id)))?;
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// The caller's customer profile. Provisions one on the fly for accounts
/// predating the profile step, so checkout never dead-ends.
async fn resolve_customer(state: &AppState, user: &AuthUser) -> Result<Customer, AppError> {
    if let Some(customer) = CustomerRepo::find_by_user_id(&state.pool, user.user_id).await? {
        return Ok(customer);
    }
    CustomerRepo::ensure_exists(&state.pool, user.user_id).await?;
    CustomerRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Customer profile provisioning failed".into()))
}
