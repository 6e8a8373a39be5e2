//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod cart;
pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod product_cover;
pub mod promotion;
pub mod review;
pub mod session;
pub mod user;
