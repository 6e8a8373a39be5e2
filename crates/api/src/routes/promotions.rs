//! Route definitions for `/promotions` (operator only).
//!
//! ```text
//! GET    /       -> list
//! POST   /       -> create
//! GET    /{id}   -> get_by_id
//! PATCH  /{id}   -> update
//! DELETE /{id}   -> delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::promotions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promotions::list).post(promotions::create))
        .route(
            "/{id}",
            get(promotions::get_by_id)
                .patch(promotions::update)
                .delete(promotions::delete),
        )
}
