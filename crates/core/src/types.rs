/// All database primary keys are PostgreSQL BIGSERIAL, except carts.
pub type DbId = i64;

/// Carts are addressed by an opaque, unguessable identifier. Possession of
/// the id is possession of the cart, so a sequential id would be guessable.
pub type CartId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
