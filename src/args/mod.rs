//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::LoadArgs;
pub use types::{HttpMethod, PositiveU64, PositiveUsize};

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("volley-loadtest/", env!("CARGO_PKG_VERSION"));
