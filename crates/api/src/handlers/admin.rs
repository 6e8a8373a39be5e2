//! Handlers for the `/admin` operator surface: aggregate reports, the
//! review moderation queue, and customer tier management.

use axum::extract::{Path, State};
use axum::Json;
use bazaar_core::error::CoreError;
use bazaar_core::types::DbId;
use bazaar_db::models::category::CategoryProductCount;
use bazaar_db::models::customer::{Customer, SetMembershipTier};
use bazaar_db::models::order::OrderStats;
use bazaar_db::models::promotion::PromotionProductCount;
use bazaar_db::models::review::ReviewWithAuthor;
use bazaar_db::repositories::{
    CategoryRepo, CustomerRepo, OrderRepo, ProductRepo, PromotionRepo, ReviewRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// Response body for `GET /admin/reports/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub categories: Vec<CategoryProductCount>,
    pub promotions: Vec<PromotionProductCount>,
    pub out_of_stock_products: i64,
}

/// GET /api/v1/admin/reports/catalog (operator only)
///
/// Per-category and per-promotion product counts plus the out-of-stock
/// count.
pub async fn catalog_report(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
) -> AppResult<Json<CatalogReport>> {
    let categories = CategoryRepo::list_with_product_counts(&state.pool).await?;
    let promotions = PromotionRepo::list_with_product_counts(&state.pool).await?;
    let out_of_stock_products = ProductRepo::count_out_of_stock(&state.pool).await?;
    Ok(Json(CatalogReport {
        categories,
        promotions,
        out_of_stock_products,
    }))
}

/// GET /api/v1/admin/reports/orders (operator only)
pub async fn orders_report(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
) -> AppResult<Json<OrderStats>> {
    Ok(Json(OrderRepo::stats(&state.pool).await?))
}

/// GET /api/v1/admin/reviews/pending (operator only)
///
/// The moderation queue, oldest first.
pub async fn pending_reviews(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
) -> AppResult<Json<Vec<ReviewWithAuthor>>> {
    Ok(Json(ReviewRepo::list_pending(&state.pool).await?))
}

/// PATCH /api/v1/admin/customers/{id} (operator only)
///
/// Set a customer's membership tier.
pub async fn set_customer_tier(
    State(state): State<AppState>,
    RequireOperator(_user): RequireOperator,
    Path(id): Path<DbId>,
    Json(input): Json<SetMembershipTier>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::set_membership_tier(&state.pool, id, input.membership_tier)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))?;
    Ok(Json(customer))
}
