//! Route definitions for the anonymous `/cart` resource.
//!
//! ```text
//! POST   /                                -> create_cart
//! GET    /{id}                            -> get_cart
//! DELETE /{id}                            -> delete_cart
//! POST   /{cart_id}/items                 -> add_item
//! GET    /{cart_id}/items/{product_id}    -> get_item
//! PATCH  /{cart_id}/items/{product_id}    -> update_item
//! DELETE /{cart_id}/items/{product_id}    -> remove_item
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::carts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(carts::create_cart))
        .route("/{id}", get(carts::get_cart).delete(carts::delete_cart))
        .route("/{cart_id}/items", post(carts::add_item))
        .route(
            "/{cart_id}/items/{product_id}",
            get(carts::get_item)
                .patch(carts::update_item)
                .delete(carts::remove_item),
        )
}
