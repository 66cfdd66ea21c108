//! Periodic enforcement of the profile data-retention policy.
//!
//! Spawns a loop that deletes profiles whose `data_retention_expires` has
//! passed (context rows follow via the FK cascade). Runs on a fixed
//! interval using `tokio::time::interval` until cancelled.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use mentora_db::repositories::ProfileRepo;

/// How often the sweep runs. Override with `RETENTION_SWEEP_INTERVAL_SECS`.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400; // daily

/// Run the retention sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("RETENTION_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Profile retention sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Profile retention sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match ProfileRepo::delete_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Retention sweep: purged expired profiles");
                        } else {
                            tracing::debug!("Retention sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Retention sweep failed");
                    }
                }
            }
        }
    }
}
