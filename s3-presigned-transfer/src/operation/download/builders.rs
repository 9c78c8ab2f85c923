/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error;
use crate::io::ProgressListener;

use super::{DownloadInputBuilder, DownloadOutput};

/// Fluent builder for constructing a single object download transfer
#[derive(Debug)]
pub struct DownloadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DownloadInputBuilder,
}

impl DownloadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Download the object through the presigned URL.
    ///
    /// Local validation errors (unwritable destination, existing file without overwrite,
    /// malformed URL) are returned as `Err` before any request is sent. Every response, and the
    /// lack of one, is reported through [`DownloadOutput::outcome`]. Unless that outcome is a
    /// success, no file is left at the destination.
    pub async fn send(self) -> Result<DownloadOutput, error::Error> {
        let input = self.inner.build()?;
        crate::operation::download::Download::orchestrate(self.handle, input).await
    }

    /// The presigned `GET` URL to download from.
    pub fn url(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.url(input);
        self
    }

    /// The presigned `GET` URL to download from.
    pub fn set_url(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_url(input);
        self
    }

    /// The presigned `GET` URL to download from.
    pub fn get_url(&self) -> &Option<String> {
        self.inner.get_url()
    }

    /// Where to save the object.
    pub fn destination(mut self, input: impl AsRef<Path>) -> Self {
        self.inner = self.inner.destination(input);
        self
    }

    /// Where to save the object.
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_destination(input);
        self
    }

    /// Where to save the object.
    pub fn get_destination(&self) -> &Option<PathBuf> {
        self.inner.get_destination()
    }

    /// Allow replacing an existing file at the destination.
    pub fn overwrite(mut self, input: bool) -> Self {
        self.inner = self.inner.overwrite(input);
        self
    }

    /// Listener notified as the object is received.
    pub fn progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.inner = self.inner.progress(listener);
        self
    }
}

impl DownloadInputBuilder {
    /// Initiate a download transfer for a single object with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<DownloadOutput, error::Error> {
        let mut fluent_builder = client.download();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
