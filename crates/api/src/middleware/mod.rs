//! Extractor-based authentication and authorization.
//!
//! - [`auth`] -- JWT Bearer extraction ([`auth::AuthUser`],
//!   [`auth::MaybeAuthUser`]).
//! - [`rbac`] -- role gates ([`rbac::RequireOperator`], [`rbac::RequireAuth`]).

pub mod auth;
pub mod rbac;
