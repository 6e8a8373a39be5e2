//! Handlers for the `/products/{slug}/reviews` resource.
//!
//! Listing is public but filtered to visible reviews unless the caller is
//! an operator; posting requires authentication; the visibility toggle is
//! operator-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::review::{CreateReview, ModerateReview, Review, ReviewWithAuthor};
use bazaar_db::repositories::{ProductRepo, ReviewRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOperator};
use crate::state::AppState;

/// GET /api/v1/products/{slug}/reviews
///
/// Anonymous and customer callers see visible reviews only; operators also
/// see the hidden ones awaiting moderation.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<ReviewWithAuthor>>> {
    let product_id = resolve_product(&state, &slug).await?;
    let reviews =
        ReviewRepo::list_for_product(&state.pool, product_id, caller.is_operator()).await?;
    Ok(Json(reviews))
}

/// POST /api/v1/products/{slug}/reviews (authenticated)
///
/// The review starts hidden; an operator decides whether it becomes visible.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(slug): Path<String>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    input.validate()?;
    let product_id = resolve_product(&state, &slug).await?;
    let review = ReviewRepo::create(&state.pool, user.user_id, product_id, &input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PATCH /api/v1/products/{slug}/reviews/{id} (operator only)
pub async fn moderate(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path((slug, id)): Path<(String, DbId)>,
    Json(input): Json<ModerateReview>,
) -> AppResult<Json<Review>> {
    let product_id = resolve_product(&state, &slug).await?;
    let review = ReviewRepo::set_visibility(&state.pool, product_id, id, input.is_visible)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Review", id)))?;
    Ok(Json(review))
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
