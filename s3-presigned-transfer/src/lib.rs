/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Single object transfers to and from Amazon S3 through presigned URLs.
//!
//! The crate has two halves:
//!
//! * an [issuer](crate::presign) that holds AWS credentials and mints time-limited
//!   presigned URLs for a `PUT` or `GET` on one object, and
//! * a transfer [`Client`] that performs exactly one HTTP request against such a URL and
//!   classifies the result into a [`Category`](crate::types::Category).
//!
//! The transfer client never sees credentials. A presigned URL is treated as an opaque string
//! and passed through unmodified, since any re-encoding would invalidate its signature.
//!
//! # Examples
//!
//! Upload a local file with a presigned `PUT` URL:
//!
//! ```no_run
//! # async fn example(url: &str) -> Result<(), s3_presigned_transfer::error::Error> {
//! let config = s3_presigned_transfer::from_env().load()?;
//! let client = s3_presigned_transfer::Client::new(config);
//!
//! let output = client
//!     .upload()
//!     .url(url)
//!     .path("reports/q3.pdf")
//!     .send()
//!     .await?;
//!
//! let outcome = output.outcome();
//! println!("{}", outcome.category().explain(outcome.method()));
//! # Ok(())
//! # }
//! ```
//!
//! Download the object behind a presigned `GET` URL into the current directory:
//!
//! ```no_run
//! # async fn example(url: &str) -> Result<(), s3_presigned_transfer::error::Error> {
//! let client = s3_presigned_transfer::Client::new(s3_presigned_transfer::from_env().load()?);
//! let output = client.download().url(url).send().await?;
//! if output.outcome().is_success() {
//!     println!("saved to {}", output.destination().display());
//! }
//! # Ok(())
//! # }
//! ```

/// Error types emitted by `s3-presigned-transfer`
pub mod error;

/// Common types used by `s3-presigned-transfer`
pub mod types;

/// Types and helpers for I/O
pub mod io;

/// Transfer client
pub mod client;

/// Transfer operations
pub mod operation;

/// Transfer client configuration
pub mod config;

/// Presigned URL issuing
pub mod presign;

/// Formatting helpers for console output
pub mod display;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
