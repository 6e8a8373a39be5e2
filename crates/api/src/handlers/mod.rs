//! HTTP handlers, one module per resource.
//!
//! Every operation has its own handler function with a fixed input/output
//! contract; there is no verb- or role-dispatching shared between them.

pub mod admin;
pub mod auth;
pub mod carts;
pub mod categories;
pub mod covers;
pub mod customers;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod reviews;
