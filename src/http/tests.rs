use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use super::client::build_client;
use super::template::{RequestTemplate, sniff_content_type};
use crate::args::HttpMethod;
use crate::config::RunConfig;
use crate::error::{AppError, AppResult, HttpError};

fn base_config() -> RunConfig {
    RunConfig {
        url: "http://localhost:3000/api/users".to_owned(),
        requests: 100,
        concurrency: 10,
        timeout: Duration::from_secs(30),
        method: HttpMethod::Get,
        body: String::new(),
        headers: vec![],
        keep_alive: true,
    }
}

#[test]
fn content_type_is_sniffed_from_the_body() {
    assert_eq!(sniff_content_type("{\"name\":\"test\"}"), "application/json");
    assert_eq!(sniff_content_type("  [1, 2, 3]"), "application/json");
    assert_eq!(
        sniff_content_type("name=test&role=admin"),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(sniff_content_type("hello world"), "text/plain");
    assert_eq!(sniff_content_type("a=b"), "text/plain");
}

#[test]
fn template_carries_default_headers() -> AppResult<()> {
    let config = base_config();
    let client = build_client(&config).map_err(AppError::from)?;
    let template = RequestTemplate::build(&client, &config).map_err(AppError::from)?;

    let request = template
        .instantiate()
        .ok_or("template must be cloneable")?;
    assert_eq!(request.method().as_str(), "GET");
    assert_eq!(request.url().path(), "/api/users");
    assert!(request.headers().contains_key(USER_AGENT));
    assert!(!request.headers().contains_key(CONTENT_TYPE));
    Ok(())
}

#[test]
fn custom_headers_override_defaults() -> AppResult<()> {
    let mut config = base_config();
    config.method = HttpMethod::Post;
    config.body = "{\"name\":\"test\"}".to_owned();
    config.headers = vec![
        ("Content-Type".to_owned(), "application/xml".to_owned()),
        ("Authorization".to_owned(), "Bearer token".to_owned()),
    ];
    let client = build_client(&config).map_err(AppError::from)?;
    let template = RequestTemplate::build(&client, &config).map_err(AppError::from)?;

    let request = template
        .instantiate()
        .ok_or("template must be cloneable")?;
    assert_eq!(request.method().as_str(), "POST");
    assert_eq!(
        request.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(b"application/xml".as_slice())
    );
    assert_eq!(
        request.headers().get("authorization").map(|v| v.as_bytes()),
        Some(b"Bearer token".as_slice())
    );
    Ok(())
}

#[test]
fn each_job_gets_an_independent_request() -> AppResult<()> {
    let mut config = base_config();
    config.method = HttpMethod::Post;
    config.body = "name=test&role=admin".to_owned();
    let client = build_client(&config).map_err(AppError::from)?;
    let template = RequestTemplate::build(&client, &config).map_err(AppError::from)?;

    let first = template.instantiate().ok_or("first clone failed")?;
    let second = template.instantiate().ok_or("second clone failed")?;
    assert_eq!(first.url(), second.url());
    assert_eq!(
        first.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(b"application/x-www-form-urlencoded".as_slice())
    );
    drop(first);
    // Dropping one clone leaves the template and other clones intact.
    assert_eq!(second.url(), template.url());
    Ok(())
}

#[test]
fn malformed_url_is_a_setup_error() -> AppResult<()> {
    let mut config = base_config();
    config.url = "not a url".to_owned();
    let client = build_client(&config).map_err(AppError::from)?;

    let result = RequestTemplate::build(&client, &config);
    assert!(matches!(result, Err(HttpError::InvalidUrl { .. })));
    Ok(())
}

#[test]
fn malformed_header_is_a_setup_error() -> AppResult<()> {
    let mut config = base_config();
    config.headers = vec![("Bad Header Name".to_owned(), "value".to_owned())];
    let client = build_client(&config).map_err(AppError::from)?;

    let result = RequestTemplate::build(&client, &config);
    assert!(matches!(result, Err(HttpError::InvalidHeaderName { .. })));
    Ok(())
}

#[test]
fn client_builds_with_keepalive_disabled() -> AppResult<()> {
    let mut config = base_config();
    config.keep_alive = false;
    build_client(&config).map_err(AppError::from)?;
    Ok(())
}
