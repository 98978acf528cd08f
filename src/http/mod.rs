//! Shared HTTP transport, the immutable request template, and the executor
//! that turns job tickets into outcomes.
mod client;
mod executor;
mod template;

#[cfg(test)]
mod tests;

pub use client::build_client;
pub use executor::HttpExecutor;
pub use template::RequestTemplate;
