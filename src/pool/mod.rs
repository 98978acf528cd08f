//! Fixed-size worker pool draining a sealed queue of job tickets.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::mpsc;
use tracing::error;

use crate::stats::{Outcome, StatsAggregator};


/// Completions between progress notifications.
pub const PROGRESS_INTERVAL: u64 = 100;

/// One unit of work: send a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub index: u64,
}

/// Executes one job and reports how it went.
///
/// The production implementation sends an HTTP request; tests substitute
/// counting or failing doubles.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, job: Job) -> Outcome;
}

/// Receives the running completion count every [`PROGRESS_INTERVAL`] jobs.
///
/// Unbounded so a slow or absent consumer can never stall a worker.
pub type ProgressSender = mpsc::UnboundedSender<u64>;

/// All job tickets for a run, handed out at most once each.
///
/// The queue is sealed at construction; once the cursor passes `limit` every
/// subsequent claim returns `None` and workers wind down.
struct JobQueue {
    cursor: AtomicU64,
    limit: u64,
}

impl JobQueue {
    const fn new(limit: u64) -> Self {
        Self {
            cursor: AtomicU64::new(0),
            limit,
        }
    }

    fn claim(&self) -> Option<Job> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        (index < self.limit).then_some(Job { index })
    }
}

/// A fixed set of concurrent workers pulling from a shared job queue.
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    #[must_use]
    pub const fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    /// Processes `job_count` jobs exactly once each, blocking until every
    /// worker has finished.
    ///
    /// Workers claim tickets, execute them, and record the outcome; a single
    /// request's failure never stops a worker. Surplus workers (concurrency
    /// above the job count) claim nothing and exit immediately.
    pub async fn run(
        &self,
        job_count: u64,
        executor: Arc<dyn Executor>,
        stats: Arc<StatsAggregator>,
        progress: Option<ProgressSender>,
    ) {
        let queue = Arc::new(JobQueue::new(job_count));
        let completed = Arc::new(AtomicU64::new(0));

        let mut workers = Vec::with_capacity(self.concurrency);
        for _ in 0..self.concurrency {
            let queue = Arc::clone(&queue);
            let executor = Arc::clone(&executor);
            let stats = Arc::clone(&stats);
            let completed = Arc::clone(&completed);
            let progress = progress.clone();

            workers.push(tokio::spawn(async move {
                while let Some(job) = queue.claim() {
                    let outcome = executor.execute(job).await;
                    stats.record(&outcome);

                    let done = completed.fetch_add(1, Ordering::Relaxed).saturating_add(1);
                    if done % PROGRESS_INTERVAL == 0
                        && let Some(progress) = progress.as_ref()
                    {
                        // Receiver may already be gone; progress is best-effort.
                        drop(progress.send(done));
                    }
                }
            }));
        }
        drop(progress);

        // Completion barrier: the snapshot is only read after this join.
        for result in join_all(workers).await {
            if let Err(err) = result {
                error!("Worker task failed: {}", err);
            }
        }
    }
}
