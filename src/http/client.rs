use std::time::Duration;

use reqwest::Client;

use crate::config::RunConfig;
use crate::error::HttpError;

/// Builds the shared transport for a run.
///
/// The connection pool is sized to twice the worker count so workers are
/// never serialized waiting for an idle connection. Certificate and hostname
/// verification are disabled: the tool targets trusted test endpoints.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be constructed.
pub fn build_client(config: &RunConfig) -> Result<Client, HttpError> {
    let mut builder = Client::builder()
        .timeout(config.timeout)
        .read_timeout(config.timeout)
        .pool_max_idle_per_host(config.concurrency.saturating_mul(2))
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true);

    if !config.keep_alive {
        builder = builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    builder
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}
