//! Route definitions.
//!
//! Route hierarchy under `/api/v1`:
//!
//! ```text
//! /auth/register                                   register (public)
//! /auth/login                                      login (public)
//! /auth/refresh                                    refresh (public)
//! /auth/logout                                     logout (requires auth)
//!
//! /products                                        list (public), create (operator)
//! /products/{slug}                                 get, update, delete
//! /products/{slug}/covers                          list, create (operator)
//! /products/{slug}/covers/{id}                     get, update, delete (operator)
//! /products/{slug}/reviews                         list (public/operator), create (auth)
//! /products/{slug}/reviews/{id}                    visibility toggle (operator)
//!
//! /categories                                      list (public), create (operator)
//! /categories/{id}                                 get, update, delete
//!
//! /promotions                                      list, create (operator)
//! /promotions/{id}                                 get, update, delete (operator)
//!
//! /cart                                            create (public)
//! /cart/{id}                                       view, abandon
//! /cart/{cart_id}/items                            add line
//! /cart/{cart_id}/items/{product_id}               get, update, remove line
//!
//! /orders                                          list (auth), checkout (auth)
//! /orders/{id}                                     get (owner/operator), delivery flag (operator)
//!
//! /customer/me                                     get, update own profile (auth)
//!
//! /admin/reports/catalog                           catalog aggregates (operator)
//! /admin/reports/orders                            order aggregates (operator)
//! /admin/reviews/pending                           moderation queue (operator)
//! /admin/customers/{id}                            membership tier (operator)
//! ```

pub mod admin;
pub mod auth;
pub mod carts;
pub mod categories;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod promotions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/promotions", promotions::router())
        .nest("/cart", carts::router())
        .nest("/orders", orders::router())
        .nest("/customer", customers::router())
        .nest("/admin", admin::router())
}
