//! Route definitions for the `/admin` operator surface.
//!
//! ```text
//! GET   /reports/catalog    -> catalog_report
//! GET   /reports/orders     -> orders_report
//! GET   /reviews/pending    -> pending_reviews
//! PATCH /customers/{id}     -> set_customer_tier
//! ```

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/catalog", get(admin::catalog_report))
        .route("/reports/orders", get(admin::orders_report))
        .route("/reviews/pending", get(admin::pending_reviews))
        .route("/customers/{id}", patch(admin::set_customer_tier))
}
