use reqwest::header::{
    ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use reqwest::{Client, Request, Url};

use crate::args::DEFAULT_USER_AGENT;
use crate::config::RunConfig;
use crate::error::HttpError;

/// The one request every job repeats, fully built before the pool starts.
///
/// Workers never touch the template itself; each job gets an independent
/// clone so concurrent sends cannot observe each other's state.
pub struct RequestTemplate {
    request: Request,
}

impl RequestTemplate {
    /// Builds the base request from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed URL or header, the only failures
    /// that abort a run before any worker starts.
    pub fn build(client: &Client, config: &RunConfig) -> Result<Self, HttpError> {
        let url = Url::parse(&config.url).map_err(|source| HttpError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if !config.body.is_empty() {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(sniff_content_type(&config.body)),
            );
        }
        // Custom headers override the defaults above.
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|source| {
                HttpError::InvalidHeaderName {
                    name: key.clone(),
                    source,
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|source| HttpError::InvalidHeaderValue {
                    name: key.clone(),
                    source,
                })?;
            headers.insert(name, value);
        }

        let mut builder = client.request(config.method.as_method(), url).headers(headers);
        if !config.body.is_empty() {
            builder = builder.body(config.body.clone());
        }

        let request = builder
            .build()
            .map_err(|source| HttpError::BuildRequestFailed { source })?;
        Ok(Self { request })
    }

    /// Derives a fresh request for one job.
    ///
    /// Returns `None` only for streaming bodies, which the template never
    /// uses; string bodies always clone.
    #[must_use]
    pub fn instantiate(&self) -> Option<Request> {
        self.request.try_clone()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        self.request.url()
    }
}

/// Guesses a Content-Type from the body shape: JSON object/array, URL-encoded
/// form, or plain text.
pub(super) fn sniff_content_type(body: &str) -> &'static str {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        "application/json"
    } else if body.contains('&') && body.contains('=') {
        "application/x-www-form-urlencoded"
    } else {
        "text/plain"
    }
}
