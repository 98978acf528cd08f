use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::app;
use crate::args::LoadArgs;
use crate::config::RunConfig;
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let args = LoadArgs::parse();

    crate::logger::init_logging(args.verbose);

    let config = RunConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&config))
}

async fn run_async(config: &RunConfig) -> AppResult<()> {
    println!("Starting load test...");
    println!("   URL: {}", config.url);
    println!("   Requests: {}", config.requests);
    println!("   Concurrency: {}", config.concurrency);
    println!("   Method: {}", config.method.as_method());
    println!();

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let total = config.requests;
    let printer = tokio::spawn(async move {
        while let Some(done) = progress_rx.recv().await {
            info!("Progress: {}/{} requests", done, total);
        }
    });

    let report = app::run(config, Some(progress_tx)).await?;

    // The pool dropped every sender, so the printer drains and exits.
    if let Err(err) = printer.await {
        error!("Progress printer failed: {}", err);
    }

    println!("{}", "=".repeat(60));
    println!("LOAD TEST RESULTS");
    println!("{}", "=".repeat(60));
    for line in app::summary_lines(&report, config) {
        println!("{}", line);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}
