/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;
mod input;
mod output;

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use tokio_util::io::ReaderStream;

use crate::error;
use crate::io::inspect;
use crate::io::progress::{ProgressStream, ProgressTracker};
use crate::types::{TransferMethod, TransferOutcome};

/// Request type for uploads through a presigned URL
pub use input::{UploadInput, UploadInputBuilder};
/// Response type for uploads through a presigned URL
pub use output::UploadOutput;

/// Operation struct for single object upload
#[derive(Clone, Default, Debug)]
pub(crate) struct Upload;

impl Upload {
    /// Execute a single `Upload` transfer operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: UploadInput,
    ) -> Result<UploadOutput, error::Error> {
        // everything local is validated before the request goes out
        let target = crate::operation::request_target(&input.url)?;
        let file_info = inspect(&input.path).await?;
        let content_type = input
            .content_type
            .clone()
            .unwrap_or_else(|| file_info.content_type().to_owned());
        let content_type_header = HeaderValue::from_str(&content_type).map_err(|_| {
            error::invalid_input(format!("invalid content type '{content_type}'"))
        })?;

        let file = tokio::fs::File::open(file_info.path())
            .await
            .map_err(|err| error::local_file(file_info.path(), err))?;

        let size = file_info.size_bytes();
        let tracker = ProgressTracker::new(Some(size), input.progress.clone());
        let stream = ProgressStream::new(
            ReaderStream::with_capacity(file, handle.config.read_chunk_size()),
            tracker.clone(),
        );

        tracing::debug!(
            "uploading {} ({size} bytes, {content_type}) with a single PUT request",
            file_info.path().display()
        );
        tracker.start();
        // S3 rejects chunked uploads to presigned URLs, the length has to be declared up front
        let result = handle
            .http_client()
            .put(target)
            .header(CONTENT_TYPE, content_type_header)
            .header(CONTENT_LENGTH, size)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await;

        let outcome = match result {
            Ok(resp) => {
                let status = resp.status().as_u16();
                tracing::debug!("upload completed with status {status}");
                let outcome =
                    TransferOutcome::new(TransferMethod::Put, status, Some(tracker.transferred()));
                if outcome.is_success() {
                    tracker.finish();
                }
                outcome
            }
            Err(err) => {
                tracing::warn!("upload request failed without a response: {err}");
                TransferOutcome::no_response(TransferMethod::Put, Some(tracker.transferred()))
            }
        };

        Ok(UploadOutput {
            outcome,
            content_type,
            file_info,
        })
    }
}
