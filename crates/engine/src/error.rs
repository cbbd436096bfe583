// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use thiserror::Error;

/// Errors that stop the runtime loop
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("task execution was aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}
