use clap::Parser;

use super::parsers::{parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP load generator - fires a fixed number of requests at a target from a bounded worker pool and reports latency, throughput, and status-code stats."
)]
pub struct LoadArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// Target URL as a bare argument (alternative to --url)
    #[arg(value_name = "URL")]
    pub target: Option<String>,

    /// Total number of requests to send
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Number of concurrent workers
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Per-request timeout (seconds)
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "30",
        value_parser = parse_positive_u64
    )]
    pub timeout_secs: PositiveU64,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Request body data (for POST/PUT)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Disable keep-alive connection reuse
    #[arg(long = "no-keepalive")]
    pub disable_keepalive: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
