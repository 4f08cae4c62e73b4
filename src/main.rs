//! dirstream - Asynchronous Directory Listing
//!
//! Entry point for the demo CLI. Prints each name as the background
//! listing discovers it, then the collected result after the join.

use anyhow::{Context, Result};
use clap::Parser;
use dirstream::config::CliArgs;
use dirstream::list::DirLister;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.verbose)?;

    let request = args.to_request().context("Invalid arguments")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    runtime.block_on(run_inner(args, request))
}

async fn run_inner(args: CliArgs, request: dirstream::ListRequest) -> Result<()> {
    let mut lister = DirLister::new(request);
    if !args.quiet {
        lister = lister.on_entry(|name| println!("found: {name}"));
    }

    // Ctrl-C cancels the listing; the partial result still prints below
    let cancel = lister.cancel_flag();
    ctrlc::set_handler({
        let cancel = cancel.clone();
        move || {
            eprintln!("\nInterrupt received, cancelling...");
            cancel.cancel();
        }
    })
    .context("Failed to set signal handler")?;

    if let Some(ms) = args.cancel_after {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            cancel.cancel();
        });
    }

    let handle = lister.spawn();
    let summary = handle.join().await.context("Listing failed")?;

    for name in &summary.entries {
        println!("result: {name}");
    }

    if summary.completed {
        info!(
            entries = summary.entries.len(),
            duration_ms = summary.duration.as_millis() as u64,
            "Listing completed"
        );
    } else {
        info!(
            entries = summary.entries.len(),
            "Listing cancelled, partial result shown"
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dirstream=debug,warn")
    } else {
        EnvFilter::new("dirstream=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
