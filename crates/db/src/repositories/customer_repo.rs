//! Repository for the `customers` table.

use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{Customer, CustomerProfile, MembershipTier, UpdateCustomerProfile};

const COLUMNS: &str = "id, user_id, membership_tier, address, postal_code, created_at, updated_at";

/// Provides profile operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Provision the customer profile for a user account if it does not
    /// exist yet. Idempotent: the unique constraint on `user_id` makes a
    /// second firing of the account-creation step a no-op.
    pub async fn ensure_exists(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO customers (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a customer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the customer owned by a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE user_id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The customer profile joined with account identity, for
    /// `GET /customer/me`.
    pub async fn profile_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<CustomerProfile>, sqlx::Error> {
        sqlx::query_as::<_, CustomerProfile>(
            "SELECT c.id, u.username, u.email, c.membership_tier, c.address, c.postal_code
             FROM customers c
             JOIN users u ON u.id = c.user_id
             WHERE c.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Self-service profile update. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the user has no customer profile.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateCustomerProfile,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                address = COALESCE($2, address),
                postal_code = COALESCE($3, postal_code),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(user_id)
            .bind(&input.address)
            .bind(&input.postal_code)
            .fetch_optional(pool)
            .await
    }

    /// Operator-only membership tier change.
    ///
    /// Returns `None` if no customer with the given `id` exists.
    pub async fn set_membership_tier(
        pool: &PgPool,
        id: DbId,
        tier: MembershipTier,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET membership_tier = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(tier)
            .fetch_optional(pool)
            .await
    }
}
