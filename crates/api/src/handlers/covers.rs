//! Handlers for the `/products/{slug}/covers` resource (operator only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::product_cover::{CreateProductCover, ProductCover, UpdateProductCover};
use bazaar_db::repositories::{ProductCoverRepo, ProductRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// GET /api/v1/products/{slug}/covers
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<ProductCover>>> {
    let product_id = resolve_product(&state, &slug).await?;
    let covers = ProductCoverRepo::list_for_product(&state.pool, product_id).await?;
    Ok(Json(covers))
}

/// POST /api/v1/products/{slug}/covers
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(slug): Path<String>,
    Json(input): Json<CreateProductCover>,
) -> AppResult<(StatusCode, Json<ProductCover>)> {
    input.validate()?;
    let product_id = resolve_product(&state, &slug).await?;
    let cover = ProductCoverRepo::create(&state.pool, product_id, &input.image_url).await?;
    Ok((StatusCode::CREATED, Json(cover)))
}

/// GET /api/v1/products/{slug}/covers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<Json<ProductCover>> {
    let product_id = resolve_product(&state, &slug).await?;
    let cover = ProductCoverRepo::find_by_id(&state.pool, product_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ProductCover", id)))?;
    Ok(Json(cover))
}

/// PATCH /api/v1/products/{slug}/covers/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path((slug, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateProductCover>,
) -> AppResult<Json<ProductCover>> {
    input.validate()?;
    let product_id = resolve_product(&state, &slug).await?;
    let cover = ProductCoverRepo::update(&state.pool, product_id, id, &input.image_url)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ProductCover", id)))?;
    Ok(Json(cover))
}

/// DELETE /api/v1/products/{slug}/covers/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let product_id = resolve_product(&state, &slug).await?;
    let deleted = ProductCoverRepo::delete(&state.pool, product_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("ProductCover", id)))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn resolve_product(state: &AppState, slug: &str) -> Result<DbId, AppError> {
    let row = ProductRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Product", slug)))?;
    Ok(row.id)
}
