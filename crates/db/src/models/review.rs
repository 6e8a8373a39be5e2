//! Review model, moderation DTOs, and the retention sweep's query row.

use bazaar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Reviewer verdict, stored as the `recommendation` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recommendation", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Recommend,
    Poor,
    Neutral,
}

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub description: String,
    pub recommendation: Recommendation,
    pub is_visible: bool,
    pub created_at: Timestamp,
}

/// Review joined with its author's username for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithAuthor {
    pub id: DbId,
    pub username: String,
    pub product_id: DbId,
    pub description: String,
    pub recommendation: Recommendation,
    pub is_visible: bool,
    pub created_at: Timestamp,
}

/// DTO for posting a review. Reviews start hidden until moderated.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 4000))]
    pub description: String,
    pub recommendation: Recommendation,
}

/// DTO for the operator visibility toggle.
#[derive(Debug, Deserialize)]
pub struct ModerateReview {
    pub is_visible: bool,
}

/// A hidden review past the retention window, with the author's address for
/// the best-effort warning email.
#[derive(Debug, Clone, FromRow)]
pub struct StaleReview {
    pub id: DbId,
    pub email: String,
    pub username: String,
}
