//! Periodic database monitoring.
//!
//! Two independent timers share one task: a connectivity probe (hourly by
//! default) and a connection-statistics report (daily by default). Failures
//! are logged and never stop the loop.

use lumina_db::DbPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorIntervals;

/// Run the monitor loop until `cancel` is triggered.
pub async fn run(pool: DbPool, intervals: MonitorIntervals, cancel: CancellationToken) {
    tracing::info!(
        probe_interval_secs = intervals.probe.as_secs(),
        stats_interval_secs = intervals.stats.as_secs(),
        "Database monitor started"
    );

    let mut probe = tokio::time::interval(intervals.probe);
    probe.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stats = tokio::time::interval(intervals.stats);
    stats.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Database monitor stopping");
                break;
            }
            _ = probe.tick() => check_connectivity(&pool).await,
            _ = stats.tick() => report_stats(&pool).await,
        }
    }
}

async fn check_connectivity(pool: &DbPool) {
    match lumina_db::health_check(pool).await {
        Ok(()) => tracing::info!("Database monitor: connection healthy"),
        Err(e) => tracing::error!(error = %e, "Database monitor: connection check failed"),
    }
}

async fn report_stats(pool: &DbPool) {
    match lumina_db::connection_stats(pool).await {
        Ok(stats) => {
            let total: i64 = stats.iter().map(|s| s.connections).sum();
            for stat in &stats {
                tracing::info!(
                    state = %stat.state,
                    connections = stat.connections,
                    "Database monitor: server connections"
                );
            }
            tracing::info!(
                server_connections = total,
                pool_size = pool.size(),
                pool_idle = pool.num_idle(),
                "Database monitor: connection statistics"
            );
        }
        Err(e) => tracing::error!(error = %e, "Database monitor: statistics query failed"),
    }
}
