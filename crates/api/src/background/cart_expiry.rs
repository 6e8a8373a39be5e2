//! Periodic cleanup of abandoned carts.
//!
//! Carts are ephemeral: checkout deletes them, and this sweep removes the
//! ones nobody ever checked out.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use bazaar_db::repositories::CartRepo;

/// Run the cart expiry loop.
///
/// Deletes carts created more than `ttl_days` ago. Runs until `cancel` is
/// triggered.
pub async fn run(pool: PgPool, ttl_days: i64, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(ttl_days, interval_secs, "Cart expiry job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cart expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(ttl_days);
                match CartRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Cart expiry: removed abandoned carts");
                        } else {
                            tracing::debug!("Cart expiry: nothing to remove");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Cart expiry: cleanup failed");
                    }
                }
            }
        }
    }
}
