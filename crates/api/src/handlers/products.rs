//! Handlers for the `/products` resource.
//!
//! Reads are public; writes require the operator role. Products are
//! addressed by slug in the URL.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::slug::validate_slug;
use bazaar_core::types::DbId;
use bazaar_db::models::product::{
    CreateProduct, Product, ProductListParams, ProductResponse, ProductSummary, UpdateProduct,
};
use bazaar_db::repositories::{CategoryRepo, ProductCoverRepo, ProductRepo, PromotionRepo};
use rust_decimal::Decimal;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// GET /api/v1/products
///
/// Available products only (inventory > 0), with category/price/search
/// filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let rows = ProductRepo::list(&state.pool, &params).await?;
    Ok(Json(rows.into_iter().map(ProductSummary::from).collect()))
}

/// GET /api/v1/products/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let row = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Product", &slug)))?;
    let images = ProductCoverRepo::list_for_product(&state.pool, row.id).await?;
    Ok(Json(ProductResponse::from_row(row, images)))
}

/// POST /api/v1/products (operator only)
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    input.validate()?;
    validate_slug(&input.slug).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_price(input.price)?;
    ensure_references_exist(&state, Some(input.category_id), input.promotion_id).await?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/v1/products/{slug} (operator only)
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(slug): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    input.validate()?;
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    ensure_references_exist(&state, input.category_id, input.promotion_id).await?;

    let product = ProductRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Product", &slug)))?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{slug} (operator only)
///
/// Fails with 409 while order lines, cart lines, or reviews still reference
/// the product.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, &slug).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Product", &slug)))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Price must be positive, got {price}"
        ))));
    }
    Ok(())
}

/// Resolve referenced category/promotion ids up front so a bad reference is
/// a 404 on the named entity instead of an opaque constraint error.
async fn ensure_references_exist(
    state: &AppState,
    category_id: Option<DbId>,
    promotion_id: Option<DbId>,
) -> Result<(), AppError> {
    if let Some(category_id) = category_id {
        CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Category", category_id)))?;
    }
    if let Some(promotion_id) = promotion_id {
        PromotionRepo::find_by_id(&state.pool, promotion_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Promotion", promotion_id)))?;
    }
    Ok(())
}
