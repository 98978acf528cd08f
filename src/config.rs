//! Immutable run configuration, fixed before the first worker starts.
use std::time::Duration;

use crate::args::{HttpMethod, LoadArgs};
use crate::error::{AppResult, ValidationError};

/// Everything a single run needs, validated up front and never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub requests: u64,
    pub concurrency: usize,
    pub timeout: Duration,
    pub method: HttpMethod,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub keep_alive: bool,
}

impl RunConfig {
    /// Builds a run configuration from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when no target URL was provided.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let url = args
            .url
            .clone()
            .or_else(|| args.target.clone())
            .ok_or_else(|| crate::error::AppError::validation(ValidationError::MissingUrl))?;

        Ok(Self {
            url,
            requests: args.requests.get(),
            concurrency: args.concurrency.get(),
            timeout: Duration::from_secs(args.timeout_secs.get()),
            method: args.method,
            body: args.data.clone(),
            headers: args.headers.clone(),
            keep_alive: !args.disable_keepalive,
        })
    }
}
