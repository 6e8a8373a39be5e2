//! Periodic purge of reviews left hidden past the retention window.
//!
//! Reviews start hidden and become visible only through moderation. A
//! review still hidden after the retention window is deleted by this sweep;
//! the author is warned by email first, best-effort. A mailer failure is
//! logged and swallowed -- it never blocks the deletion.

use std::sync::Arc;
use std::time::Duration;

use bazaar_notify::Mailer;
use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use bazaar_db::repositories::ReviewRepo;

/// Subject line of the pre-deletion warning email.
const WARNING_SUBJECT: &str = "Your review could not be published";

/// Run the review retention loop.
///
/// Deletes hidden reviews older than `retention_days`, warning each author
/// by email when a mailer is configured. Runs until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    mailer: Option<Arc<Mailer>>,
    retention_days: i64,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    tracing::info!(
        retention_days,
        interval_secs,
        mail_enabled = mailer.is_some(),
        "Review retention job started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Review retention job stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = sweep(&pool, mailer.as_deref(), retention_days).await {
                    tracing::error!(error = %e, "Review retention: sweep failed");
                }
            }
        }
    }
}

/// One pass: select stale hidden reviews, warn their authors, delete them.
async fn sweep(pool: &PgPool, mailer: Option<&Mailer>, retention_days: i64) -> Result<(), sqlx::Error> {
    let cutoff = Utc::now() - chrono::Duration::days(retention_days);
    let stale = ReviewRepo::find_stale_hidden(pool, cutoff).await?;
    if stale.is_empty() {
        tracing::debug!("Review retention: nothing to purge");
        return Ok(());
    }

    if let Some(mailer) = mailer {
        for review in &stale {
            let body = format!(
                "Hello {},\n\nYour review was not approved for publication and has \
                 been removed along with its content.\n",
                review.username
            );
            // Best-effort only. The deletion below proceeds regardless.
            if let Err(e) = mailer.send(&review.email, WARNING_SUBJECT, &body).await {
                tracing::warn!(review_id = review.id, error = %e, "Review retention: warning email failed");
            }
        }
    }

    let ids: Vec<_> = stale.iter().map(|r| r.id).collect();
    let deleted = ReviewRepo::delete_by_ids(pool, &ids).await?;
    tracing::info!(deleted, "Review retention: purged hidden reviews");
    Ok(())
}
