//! Handlers for the `/categories` resource.
//!
//! Reads are public; writes require the operator role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::category::{Category, CreateCategory, UpdateCategory};
use bazaar_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::query::IncludeInactiveParams;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Active categories by default; `?include_inactive=true` lists all.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;
    Ok(Json(category))
}

/// POST /api/v1/categories (operator only)
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/v1/categories/{id} (operator only)
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    input.validate()?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id} (operator only)
///
/// Fails with 409 while products still reference the category; there is no
/// silent cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Category", id)))
    }
}
