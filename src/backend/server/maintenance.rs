//! Periodic cleanup of expired data
//!
//! Expired events and completed personal tasks are already hidden from reads;
//! this removes them for good, along with event images and stale passcodes.

use std::io;

use chrono::{DateTime, Utc};

use crate::backend::events::db::purge_expired_events;
use crate::backend::files::storage::remove_public_file;
use crate::backend::server::state::AppState;
use crate::backend::users::tasks::purge_expired_tasks;

/// What one sweep removed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub events: usize,
    pub tasks: u64,
    pub passcodes: usize,
}

/// Run one sweep as of `now`
///
/// Failures are logged and the sweep moves on to the next kind of data.
pub async fn purge_once(state: &AppState, now: DateTime<Utc>) -> PurgeReport {
    let mut report = PurgeReport {
        passcodes: state.otp_store.purge_expired(),
        ..PurgeReport::default()
    };

    let Some(pool) = &state.db_pool else {
        return report;
    };

    match purge_expired_events(pool, now).await {
        Ok(images) => {
            report.events = images.len();
            for image in images {
                match remove_public_file(&state.config.public_dir, &image).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!("[Maintenance] Could not remove image {}: {}", image, e),
                }
            }
        }
        Err(e) => tracing::error!("[Maintenance] Failed to purge events: {}", e),
    }

    match purge_expired_tasks(pool, now).await {
        Ok(count) => report.tasks = count,
        Err(e) => tracing::error!("[Maintenance] Failed to purge personal tasks: {}", e),
    }

    report
}

/// Sweep on every tick of `state.config.purge_interval`, forever
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(state.config.purge_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let report = purge_once(&state, Utc::now()).await;
        if report != PurgeReport::default() {
            tracing::info!(
                "[Maintenance] Purged {} events, {} tasks, {} passcodes",
                report.events,
                report.tasks,
                report.passcodes
            );
        } else {
            tracing::debug!("[Maintenance] Nothing to purge");
        }
    }
}
