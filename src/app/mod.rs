//! Run orchestration: build the template once, drive the pool, snapshot.
mod summary;


pub use summary::summary_lines;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestTemplate, build_client};
use crate::pool::{ProgressSender, WorkerPool};
use crate::stats::{StatsAggregator, StatsSnapshot};

/// Final statistics plus the measured wall-clock time of the whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: StatsSnapshot,
    pub elapsed: Duration,
}

/// Executes one full load-test run.
///
/// The transport and request template are built before any worker starts;
/// a failure there aborts the run and is the only fatal path. Every
/// per-request failure downstream is absorbed into the statistics.
///
/// # Errors
///
/// Returns an error when the HTTP client or request template cannot be
/// built (malformed URL or header).
pub async fn run(config: &RunConfig, progress: Option<ProgressSender>) -> AppResult<RunReport> {
    let client = build_client(config)?;
    let template = RequestTemplate::build(&client, config)?;
    let executor = Arc::new(HttpExecutor::new(client, template));
    let stats = Arc::new(StatsAggregator::new());

    let start = Instant::now();
    WorkerPool::new(config.concurrency)
        .run(config.requests, executor, Arc::clone(&stats), progress)
        .await;
    let elapsed = start.elapsed();

    Ok(RunReport {
        stats: stats.snapshot(),
        elapsed,
    })
}
