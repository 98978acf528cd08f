//! Lock-free aggregation of request outcomes across concurrent workers.
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;


/// Sentinel for the running minimum, larger than any plausible latency.
const MIN_SENTINEL_NS: u64 = 3_600_000_000_000;

/// Lowest status code with a histogram bucket.
const STATUS_FLOOR: u16 = 100;

/// Bucket count covering status codes 100..=999, the full range the HTTP
/// layer can hand back. Anything a server replies with must land in the
/// histogram, or its sum drifts from the successful count.
const STATUS_BUCKETS: usize = 900;

/// The result of executing one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    duration: Duration,
    kind: OutcomeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// A response was received. Any status counts, 5xx included; only
    /// transport-level failures are recorded as failed.
    Completed { status: u16 },
    Failed { error: String },
}

impl Outcome {
    #[must_use]
    pub const fn completed(duration: Duration, status: u16) -> Self {
        Self {
            duration,
            kind: OutcomeKind::Completed { status },
        }
    }

    #[must_use]
    pub fn failed(duration: Duration, error: String) -> Self {
        Self {
            duration,
            kind: OutcomeKind::Failed { error },
        }
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub const fn kind(&self) -> &OutcomeKind {
        &self.kind
    }
}

/// Shared accumulator for request outcomes.
///
/// Every field is an atomic, so workers call [`StatsAggregator::record`]
/// concurrently through a shared reference with no external locking. Reads
/// happen only through [`StatsAggregator::snapshot`] after the worker pool
/// has joined.
pub struct StatsAggregator {
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
    total_duration_ns: AtomicU64,
    min_duration_ns: AtomicU64,
    max_duration_ns: AtomicU64,
    status_counts: [AtomicU64; STATUS_BUCKETS],
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            successful: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            total_duration_ns: AtomicU64::new(0),
            min_duration_ns: AtomicU64::new(MIN_SENTINEL_NS),
            max_duration_ns: AtomicU64::new(0),
            status_counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Folds one outcome into the running totals.
    pub fn record(&self, outcome: &Outcome) {
        let duration_ns = duration_to_ns(outcome.duration());

        self.total.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ns
            .fetch_add(duration_ns, Ordering::Relaxed);
        self.update_min(duration_ns);
        self.update_max(duration_ns);

        match *outcome.kind() {
            OutcomeKind::Completed { status } => {
                self.successful.fetch_add(1, Ordering::Relaxed);
                if let Some(slot) = status_slot(status)
                    && let Some(bucket) = self.status_counts.get(slot)
                {
                    bucket.fetch_add(1, Ordering::Relaxed);
                }
            }
            OutcomeKind::Failed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn update_min(&self, duration_ns: u64) {
        let mut current = self.min_duration_ns.load(Ordering::Relaxed);
        while duration_ns < current {
            match self.min_duration_ns.compare_exchange_weak(
                current,
                duration_ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    fn update_max(&self, duration_ns: u64) {
        let mut current = self.max_duration_ns.load(Ordering::Relaxed);
        while duration_ns > current {
            match self.max_duration_ns.compare_exchange_weak(
                current,
                duration_ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    /// Takes an owned, read-only view of the totals.
    ///
    /// Only meaningful once all writers have finished; the pool's join is the
    /// synchronization barrier between the last `record` and this read.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let total = self.total.load(Ordering::Acquire);
        let min_ns = match self.min_duration_ns.load(Ordering::Acquire) {
            MIN_SENTINEL_NS => 0,
            observed => observed,
        };

        let mut status_counts = BTreeMap::new();
        for (slot, bucket) in self.status_counts.iter().enumerate() {
            let count = bucket.load(Ordering::Acquire);
            if count > 0
                && let Ok(offset) = u16::try_from(slot)
            {
                status_counts.insert(STATUS_FLOOR.saturating_add(offset), count);
            }
        }

        StatsSnapshot {
            total,
            successful: self.successful.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            total_duration: Duration::from_nanos(self.total_duration_ns.load(Ordering::Acquire)),
            min_duration: Duration::from_nanos(min_ns),
            max_duration: Duration::from_nanos(self.max_duration_ns.load(Ordering::Acquire)),
            status_counts,
        }
    }
}

/// Immutable statistics for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub total_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
    pub status_counts: BTreeMap<u16, u64>,
}

impl StatsSnapshot {
    /// Mean latency across all outcomes, zero for an empty run.
    #[must_use]
    pub fn average_duration(&self) -> Duration {
        if self.total == 0 {
            return Duration::ZERO;
        }
        let avg_ns = self
            .total_duration
            .as_nanos()
            .checked_div(u128::from(self.total))
            .unwrap_or(0);
        Duration::from_nanos(u64::try_from(avg_ns).unwrap_or(u64::MAX))
    }

    /// Success rate as fixed-point percent x100 (e.g. 9950 for 99.50%).
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        self.successful
            .saturating_mul(10_000)
            .checked_div(self.total)
            .unwrap_or(0)
    }
}

fn duration_to_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

fn status_slot(status: u16) -> Option<usize> {
    let offset = status.checked_sub(STATUS_FLOOR)?;
    let slot = usize::from(offset);
    (slot < STATUS_BUCKETS).then_some(slot)
}
