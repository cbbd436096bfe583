// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report configured tasks without running them

use crate::output::{self, OutputFormat};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tasklens_core::{ScheduledTasksReporter, SystemClock};
use tasklens_engine::{build_registry, Runtime};

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Task configuration file
    #[arg(long, short)]
    pub config: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: ShowArgs) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let registry = Arc::new(build_registry(&config));

    // Arm the timers so next execution times are known
    Runtime::new(Arc::clone(&registry), SystemClock).start();

    let snapshot = ScheduledTasksReporter::for_holder(registry).report();
    output::print(&snapshot, args.format)
}
