/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;
mod filename;
mod input;
mod object_meta;
mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::StreamExt;

use crate::error::{self, ErrorKind};
use crate::io::partial_file::PartialFile;
use crate::io::progress::ProgressTracker;
use crate::types::{TransferMethod, TransferOutcome};

pub use filename::derive_filename;
/// Request type for downloads through a presigned URL
pub use input::{DownloadInput, DownloadInputBuilder};
pub use object_meta::ObjectMetadata;
/// Response type for downloads through a presigned URL
pub use output::DownloadOutput;

/// Operation struct for single object download
#[derive(Clone, Default, Debug)]
pub(crate) struct Download;

/// Result of the metadata probe sent ahead of the download
#[derive(Debug)]
enum Probe {
    /// The probe was answered successfully
    Metadata(ObjectMetadata),
    /// The probe was answered with a non-success status or not sent at all
    Unavailable,
    /// No response was received
    NoResponse,
}

impl Download {
    /// Execute a single `Download` transfer operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DownloadInput,
    ) -> Result<DownloadOutput, error::Error> {
        let target = crate::operation::request_target(&input.url)?;
        let destination = resolve_destination(input.destination.as_deref(), &input.url).await;
        validate_destination(&destination, input.overwrite).await?;
        // must exist before any request is sent, removed on every path that does not commit it
        let mut partial = PartialFile::create(&destination).await?;

        let object_meta = if handle.config.probe_metadata() {
            match probe(&handle, target.clone()).await {
                Probe::Metadata(meta) => Some(meta),
                Probe::Unavailable => None,
                Probe::NoResponse => {
                    return Ok(DownloadOutput {
                        outcome: TransferOutcome::no_response(TransferMethod::Get, None),
                        destination,
                        object_meta: None,
                    });
                }
            }
        } else {
            None
        };

        let resp = match handle.http_client().get(target).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!("download request failed without a response: {err}");
                return Ok(DownloadOutput {
                    outcome: TransferOutcome::no_response(TransferMethod::Get, None),
                    destination,
                    object_meta,
                });
            }
        };

        let status = resp.status().as_u16();
        let outcome = TransferOutcome::new(TransferMethod::Get, status, None);
        if !outcome.is_success() {
            tracing::debug!("download rejected with status {status}");
            return Ok(DownloadOutput {
                outcome,
                destination,
                object_meta,
            });
        }

        let total = resp
            .content_length()
            .or_else(|| object_meta.as_ref().and_then(|meta| meta.content_length));
        let tracker = ProgressTracker::new(total, input.progress.clone());
        tracker.start();

        let mut body = resp.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    tracing::warn!(
                        "download interrupted after {} bytes: {err}",
                        tracker.transferred()
                    );
                    return Ok(DownloadOutput {
                        outcome: TransferOutcome::no_response(
                            TransferMethod::Get,
                            Some(tracker.transferred()),
                        ),
                        destination,
                        object_meta,
                    });
                }
            };
            partial
                .write_all(&chunk)
                .await
                .map_err(|err| error::destination(&destination, err))?;
            tracker.advance(chunk.len() as u64);
        }

        let size = partial.commit().await?;
        tracker.finish();
        tracing::debug!("saved {size} bytes to {}", destination.display());

        Ok(DownloadOutput {
            outcome: TransferOutcome::new(TransferMethod::Get, status, Some(size)),
            destination,
            object_meta,
        })
    }
}

/// Send a `HEAD` request for the object's size and type.
///
/// URLs presigned for `GET` are usually rejected for `HEAD` (the method is part of the
/// signature), so a non-success status only means the metadata is unavailable.
async fn probe(handle: &crate::client::Handle, target: reqwest::Url) -> Probe {
    match handle.http_client().head(target).send().await {
        Ok(resp) if resp.status().is_success() => Probe::Metadata(ObjectMetadata::from(resp.headers())),
        Ok(resp) => {
            tracing::debug!(
                "metadata probe answered with status {}, continuing without it",
                resp.status()
            );
            Probe::Unavailable
        }
        Err(err) => {
            tracing::warn!("metadata probe failed without a response: {err}");
            Probe::NoResponse
        }
    }
}

/// Pick the local path to write to.
async fn resolve_destination(requested: Option<&Path>, url: &str) -> PathBuf {
    match requested {
        Some(path) if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) => {
            path.join(derive_filename(url))
        }
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(derive_filename(url)),
    }
}

/// Check that `destination` can be created before any request is sent.
async fn validate_destination(destination: &Path, overwrite: bool) -> Result<(), error::Error> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let parent_meta = tokio::fs::metadata(parent).await.map_err(|err| {
        error::Error::new(
            ErrorKind::DestinationInvalid,
            format!("directory {} is not accessible: {err}", parent.display()),
        )
    })?;
    if !parent_meta.is_dir() {
        return Err(error::Error::new(
            ErrorKind::DestinationInvalid,
            format!("{} is not a directory", parent.display()),
        ));
    }

    match tokio::fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => Err(error::Error::new(
            ErrorKind::DestinationInvalid,
            format!("{} is a directory", destination.display()),
        )),
        Ok(_) if !overwrite => Err(error::Error::new(
            ErrorKind::DestinationExists,
            format!("{}", destination.display()),
        )),
        Ok(_) => {
            tracing::debug!("overwriting {}", destination.display());
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(error::destination(destination, err)),
    }
}
