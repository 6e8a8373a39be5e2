//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20250301000001_create_users_and_sessions.sql`.

pub const ROLE_OPERATOR: &str = "operator";
pub const ROLE_CUSTOMER: &str = "customer";
