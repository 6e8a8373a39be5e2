//! Route definitions for the `/customer` self-service resource.
//!
//! ```text
//! GET /me   -> me
//! PUT /me   -> update_me
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(customers::me).put(customers::update_me))
}
