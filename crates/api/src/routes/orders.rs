//! Route definitions for `/orders`.
//!
//! ```text
//! GET    /       -> list (auth; operators see all)
//! POST   /       -> checkout (auth)
//! GET    /{id}   -> get_by_id (owner or operator)
//! PATCH  /{id}   -> update_delivery (operator)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::checkout))
        .route(
            "/{id}",
            get(orders::get_by_id).patch(orders::update_delivery),
        )
}
