// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configured tasks until stopped

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tasklens_core::{ScheduledTasksReporter, SystemClock};
use tasklens_engine::{build_registry, Runtime};
use tokio::sync::watch;

#[derive(clap::Args)]
pub struct RunArgs {
    /// Task configuration file
    #[arg(long, short)]
    pub config: PathBuf,

    /// Stop after this long (e.g. "30s", "5m"); runs until Ctrl-C otherwise
    #[arg(long = "for", value_parser = humantime::parse_duration)]
    pub duration: Option<Duration>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let registry = Arc::new(build_registry(&config));
    tracing::info!(config = %args.config.display(), tasks = registry.len(), "starting scheduler");

    let (tx, rx) = watch::channel(false);
    let tx = Arc::new(tx);

    {
        let tx = Arc::clone(&tx);
        ctrlc::set_handler(move || {
            eprintln!("\nStopping scheduler...");
            let _ = tx.send(true);
        })
        .context("installing Ctrl-C handler")?;
    }

    if let Some(limit) = args.duration {
        let tx = Arc::clone(&tx);
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            let _ = tx.send(true);
        });
    }

    Runtime::new(Arc::clone(&registry), SystemClock)
        .run(rx)
        .await
        .context("scheduler failed")?;

    let snapshot = ScheduledTasksReporter::for_holder(registry).report();
    output::print(&snapshot, args.format)
}
