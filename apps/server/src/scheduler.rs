//! Background housekeeping for the dashboard cache.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// How often expired dashboard aggregations are dropped.
const PURGE_INTERVAL_SECS: u64 = 5 * 60;

/// Starts the periodic purge of expired dashboard cache entries.
pub fn start_cache_purge_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Dashboard cache purge scheduler started ({PURGE_INTERVAL_SECS}s interval)");
        let mut purge_interval = interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        // The first tick completes immediately.
        purge_interval.tick().await;

        loop {
            purge_interval.tick().await;
            run_purge(&state);
        }
    });
}

fn run_purge(state: &AppState) {
    let purged = state.dashboard_cache.purge_expired();
    if purged > 0 {
        debug!(
            "Purged {} expired dashboard aggregations, {} remain",
            purged,
            state.dashboard_cache.len()
        );
    }
}
