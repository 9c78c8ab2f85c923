/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
//! Error types for the stub server.

use std::io;
use thiserror::Error;

/// Result type for stub server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for stub server operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The server failed to start.
    #[error("server failed to start: {0}")]
    ServerStartFailed(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
