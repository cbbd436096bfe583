// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check a configuration file

use anyhow::Result;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Task configuration file
    #[arg(long, short)]
    pub config: PathBuf,
}

pub fn handle(args: ValidateArgs) -> Result<()> {
    let config = super::load_config(&args.config)?;
    println!("ok: {} tasks", config.len());
    Ok(())
}
