use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::{Client, Request};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::pool::{Executor, Job};
use crate::stats::Outcome;

use super::template::RequestTemplate;

/// Per-request failures logged at warn level before dropping to debug.
const FAILURE_LOG_LIMIT: u64 = 3;

/// Sends one HTTP request per job over the shared transport.
pub struct HttpExecutor {
    client: Client,
    template: RequestTemplate,
    logged_failures: AtomicU64,
}

impl HttpExecutor {
    #[must_use]
    pub fn new(client: Client, template: RequestTemplate) -> Self {
        Self {
            client,
            template,
            logged_failures: AtomicU64::new(0),
        }
    }

    async fn send(&self, request: Request, job: Job) -> Outcome {
        let start = Instant::now();
        let result = self.client.execute(request).await;
        let duration = start.elapsed();

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                // Drain and discard the body so the connection returns to
                // the pool. A failed drain does not demote the outcome: a
                // response was received.
                if let Err(err) = response.bytes().await {
                    debug!("Failed to drain response body: {}", err);
                }
                Outcome::completed(duration, status)
            }
            Err(err) => {
                let seen = self.logged_failures.fetch_add(1, Ordering::Relaxed);
                if seen < FAILURE_LOG_LIMIT {
                    warn!("Request {} failed: {}", job.index, err);
                } else {
                    debug!("Request {} failed: {}", job.index, err);
                }
                Outcome::failed(duration, err.to_string())
            }
        }
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, job: Job) -> Outcome {
        match self.template.instantiate() {
            Some(request) => self.send(request, job).await,
            None => Outcome::failed(
                std::time::Duration::ZERO,
                "failed to clone request template".to_owned(),
            ),
        }
    }
}
