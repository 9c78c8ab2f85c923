/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error;
use crate::io::ProgressListener;

use super::{UploadInputBuilder, UploadOutput};

/// Fluent builder for constructing a single file upload transfer
#[derive(Debug)]
pub struct UploadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: UploadInputBuilder,
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Upload the file through the presigned URL.
    ///
    /// Local validation errors (missing file, unreadable file, malformed URL) are returned as
    /// `Err` before any request is sent. Every response, and the lack of one, is reported through
    /// [`UploadOutput::outcome`].
    pub async fn send(self) -> Result<UploadOutput, error::Error> {
        let input = self.inner.build()?;
        crate::operation::upload::Upload::orchestrate(self.handle, input).await
    }

    /// The presigned `PUT` URL to upload to.
    pub fn url(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.url(input);
        self
    }

    /// The presigned `PUT` URL to upload to.
    pub fn set_url(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_url(input);
        self
    }

    /// The presigned `PUT` URL to upload to.
    pub fn get_url(&self) -> &Option<String> {
        self.inner.get_url()
    }

    /// Path of the local file to upload.
    pub fn path(mut self, input: impl AsRef<Path>) -> Self {
        self.inner = self.inner.path(input);
        self
    }

    /// Path of the local file to upload.
    pub fn set_path(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_path(input);
        self
    }

    /// Path of the local file to upload.
    pub fn get_path(&self) -> &Option<PathBuf> {
        self.inner.get_path()
    }

    /// Content type to send instead of the detected one.
    pub fn content_type(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.content_type(input);
        self
    }

    /// Content type to send instead of the detected one.
    pub fn set_content_type(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_content_type(input);
        self
    }

    /// Listener notified as the file is streamed.
    pub fn progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.inner = self.inner.progress(listener);
        self
    }
}

impl UploadInputBuilder {
    /// Initiate an upload transfer for a single file with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<UploadOutput, error::Error> {
        let mut fluent_builder = client.upload();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
