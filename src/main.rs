mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod pool;
mod stats;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
