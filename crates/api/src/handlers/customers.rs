//! Handlers for the `/customer/me` self-service profile resource.

use axum::extract::State;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_db::models::customer::{Customer, CustomerProfile, UpdateCustomerProfile};
use bazaar_db::repositories::CustomerRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/customer/me (authenticated)
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<CustomerProfile>> {
    if let Some(profile) = CustomerRepo::profile_by_user_id(&state.pool, user.user_id).await? {
        return Ok(Json(profile));
    }
    // Accounts predating the provisioning step get their profile now.
    CustomerRepo::ensure_exists(&state.pool, user.user_id).await?;
    let profile = CustomerRepo::profile_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Customer profile provisioning failed".into()))?;
    Ok(Json(profile))
}

/// PUT /api/v1/customer/me (authenticated)
///
/// Address and postal code only; the membership tier is operator-managed.
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<UpdateCustomerProfile>,
) -> AppResult<Json<Customer>> {
    input.validate()?;
    CustomerRepo::ensure_exists(&state.pool, user.user_id).await?;
    let customer = CustomerRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("Customer", user.user_id))
        })?;
    Ok(Json(customer))
}
