//! Route definitions for the catalog's `/products` resource, including the
//! nested cover and review sub-resources.
//!
//! ```text
//! GET    /                           -> list
//! POST   /                           -> create (operator)
//! GET    /{slug}                     -> get_by_slug
//! PATCH  /{slug}                     -> update (operator)
//! DELETE /{slug}                     -> delete (operator)
//! GET    /{slug}/covers              -> covers::list (operator)
//! POST   /{slug}/covers              -> covers::create (operator)
//! GET    /{slug}/covers/{id}         -> covers::get_by_id (operator)
//! PATCH  /{slug}/covers/{id}         -> covers::update (operator)
//! DELETE /{slug}/covers/{id}         -> covers::delete (operator)
//! GET    /{slug}/reviews             -> reviews::list
//! POST   /{slug}/reviews             -> reviews::create (auth)
//! PATCH  /{slug}/reviews/{id}        -> reviews::moderate (operator)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{covers, products, reviews};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{slug}",
            get(products::get_by_slug)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/{slug}/covers", get(covers::list).post(covers::create))
        .route(
            "/{slug}/covers/{id}",
            get(covers::get_by_id)
                .patch(covers::update)
                .delete(covers::delete),
        )
        .route("/{slug}/reviews", get(reviews::list).post(reviews::create))
        .route("/{slug}/reviews/{id}", axum::routing::patch(reviews::moderate))
}
