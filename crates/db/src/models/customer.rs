//! Customer profile model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Membership tier, stored as the `membership_tier` PostgreSQL enum.
/// New customers start at the lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Gold,
    Silver,
    Bronze,
}

/// A row from the `customers` table. Exactly one exists per user account.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub user_id: DbId,
    pub membership_tier: MembershipTier,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Customer joined with account identity for `GET /customer/me`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub membership_tier: MembershipTier,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

/// DTO for self-service profile edits. Membership tier is operator-only and
/// deliberately absent here.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerProfile {
    #[validate(length(max = 512))]
    pub address: Option<String>,
    #[validate(length(max = 10))]
    pub postal_code: Option<String>,
}

/// DTO for the operator membership-tier change.
#[derive(Debug, Deserialize)]
pub struct SetMembershipTier {
    pub membership_tier: MembershipTier,
}
