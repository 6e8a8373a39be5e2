//! Framework-free domain primitives shared by the data layer and the API.
//!
//! - [`types`] -- id and timestamp aliases used across the workspace.
//! - [`error`] -- the domain error taxonomy.
//! - [`roles`] -- well-known role name constants.
//! - [`pricing`] -- promotion discount arithmetic.
//! - [`slug`] -- URL-safe slug validation.

pub mod error;
pub mod pricing;
pub mod roles;
pub mod slug;
pub mod types;
