//! Integration tests for review moderation and the retention sweep queries.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;

use bazaar_db::models::category::CreateCategory;
use bazaar_db::models::product::CreateProduct;
use bazaar_db::models::review::{CreateReview, Recommendation};
use bazaar_db::models::user::CreateUser;
use bazaar_db::repositories::{CategoryRepo, ProductRepo, ReviewRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_product(pool: &PgPool) -> i64 {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            title: "Gadgets".to_string(),
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    ProductRepo::create(
        pool,
        &CreateProduct {
            category_id: category.id,
            title: "Widget".to_string(),
            slug: "widget".to_string(),
            description: None,
            promotion_id: None,
            price: Decimal::from_str("10.00").unwrap(),
            inventory: 5,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$test".to_string(),
            role: "customer".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_review(text: &str) -> CreateReview {
    CreateReview {
        description: text.to_string(),
        recommendation: Recommendation::Recommend,
    }
}

/// Backdate a review so it falls past the retention cutoff.
async fn backdate_review(pool: &PgPool, id: i64, days: i32) {
    sqlx::query("UPDATE reviews SET created_at = NOW() - ($2 || ' days')::INTERVAL WHERE id = $1")
        .bind(id)
        .bind(days.to_string())
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: reviews start hidden and only moderation reveals them
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_starts_hidden(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let user_id = seed_user(&pool, "alice").await;

    let review = ReviewRepo::create(&pool, user_id, product_id, &new_review("Great"))
        .await
        .unwrap();
    assert!(!review.is_visible);
    assert_eq!(review.recommendation, Recommendation::Recommend);

    // Public listing is empty while the review is hidden.
    let visible = ReviewRepo::list_for_product(&pool, product_id, false)
        .await
        .unwrap();
    assert!(visible.is_empty());

    // Operators see it regardless.
    let all = ReviewRepo::list_for_product(&pool, product_id, true)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].username, "alice");

    // Moderation reveals it to everyone.
    let shown = ReviewRepo::set_visibility(&pool, product_id, review.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(shown.is_visible);
    let visible = ReviewRepo::list_for_product(&pool, product_id, false)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: visibility updates are scoped to the product in the path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_visibility_scoped_by_product(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let user_id = seed_user(&pool, "alice").await;
    let review = ReviewRepo::create(&pool, user_id, product_id, &new_review("Hi"))
        .await
        .unwrap();

    // A wrong product id must not reach the review.
    let missed = ReviewRepo::set_visibility(&pool, product_id + 1, review.id, true)
        .await
        .unwrap();
    assert!(missed.is_none());
}

// ---------------------------------------------------------------------------
// Test: the retention sweep selects only hidden reviews past the cutoff
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_hidden_reviews_selected_and_deleted(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let user_id = seed_user(&pool, "alice").await;

    let stale = ReviewRepo::create(&pool, user_id, product_id, &new_review("Old hidden"))
        .await
        .unwrap();
    backdate_review(&pool, stale.id, 3).await;

    let fresh = ReviewRepo::create(&pool, user_id, product_id, &new_review("New hidden"))
        .await
        .unwrap();

    let old_but_visible = ReviewRepo::create(&pool, user_id, product_id, &new_review("Old shown"))
        .await
        .unwrap();
    ReviewRepo::set_visibility(&pool, product_id, old_but_visible.id, true)
        .await
        .unwrap();
    backdate_review(&pool, old_but_visible.id, 3).await;

    let cutoff = chrono::Utc::now() - chrono::Duration::days(2);
    let candidates = ReviewRepo::find_stale_hidden(&pool, cutoff).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, stale.id);
    assert_eq!(candidates[0].email, "alice@example.com");

    let ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();
    let removed = ReviewRepo::delete_by_ids(&pool, &ids).await.unwrap();
    assert_eq!(removed, 1);

    // The fresh hidden review and the visible one survive.
    let remaining = ReviewRepo::list_for_product(&pool, product_id, true)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|r| r.id == fresh.id));
    assert!(remaining.iter().any(|r| r.id == old_but_visible.id));
}

// ---------------------------------------------------------------------------
// Test: the moderation queue lists hidden reviews oldest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_queue_oldest_first(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let user_id = seed_user(&pool, "alice").await;

    let older = ReviewRepo::create(&pool, user_id, product_id, &new_review("older"))
        .await
        .unwrap();
    backdate_review(&pool, older.id, 1).await;
    let newer = ReviewRepo::create(&pool, user_id, product_id, &new_review("newer"))
        .await
        .unwrap();

    let pending = ReviewRepo::list_pending(&pool).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, older.id);
    assert_eq!(pending[1].id, newer.id);
}
