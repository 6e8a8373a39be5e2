//! Route definitions for `/categories`.
//!
//! ```text
//! GET    /       -> list
//! POST   /       -> create (operator)
//! GET    /{id}   -> get_by_id
//! PATCH  /{id}   -> update (operator)
//! DELETE /{id}   -> delete (operator)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .patch(categories::update)
                .delete(categories::delete),
        )
}
