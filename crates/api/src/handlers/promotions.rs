//! Handlers for the `/promotions` resource (operator only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::pricing::validate_discount;
use bazaar_core::types::DbId;
use bazaar_db::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use bazaar_db::repositories::PromotionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// GET /api/v1/promotions
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
) -> AppResult<Json<Vec<Promotion>>> {
    let promotions = PromotionRepo::list(&state.pool).await?;
    Ok(Json(promotions))
}

/// GET /api/v1/promotions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Promotion", id)))?;
    Ok(Json(promotion))
}

/// POST /api/v1/promotions
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Json(input): Json<CreatePromotion>,
) -> AppResult<(StatusCode, Json<Promotion>)> {
    validate_discount(input.discount).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let promotion = PromotionRepo::create(&state.pool, input.discount).await?;
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// PATCH /api/v1/promotions/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromotion>,
) -> AppResult<Json<Promotion>> {
    let Some(discount) = input.discount else {
        return Err(AppError::Core(CoreError::Validation(
            "A discount value is required".into(),
        )));
    };
    validate_discount(discount).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let promotion = PromotionRepo::update(&state.pool, id, discount)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Promotion", id)))?;
    Ok(Json(promotion))
}

/// DELETE /api/v1/promotions/{id}
///
/// Products referencing the promotion fall back to their list price.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PromotionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Promotion", id)))
    }
}
