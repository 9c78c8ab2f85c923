/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error;
use crate::io::ProgressListener;

/// Request type for downloading a single object through a presigned `GET` URL
#[non_exhaustive]
#[derive(Clone)]
pub struct DownloadInput {
    /// The presigned `GET` URL, passed through unmodified
    pub url: String,

    /// Where to save the object.
    ///
    /// When unset the name is derived from the URL and the file is saved in the current
    /// directory. When it names an existing directory the derived name is saved inside it.
    pub destination: Option<PathBuf>,

    /// Whether an existing file at the destination may be replaced
    pub overwrite: bool,

    pub(crate) progress: Option<Arc<dyn ProgressListener>>,
}

impl DownloadInput {
    /// Creates a new builder-style object to manufacture [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn builder() -> DownloadInputBuilder {
        DownloadInputBuilder::default()
    }

    /// The presigned `GET` URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The requested destination, if any
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Whether an existing destination may be replaced
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

impl fmt::Debug for DownloadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadInput")
            .field("url", &"*** Sensitive Data Redacted ***")
            .field("destination", &self.destination)
            .field("overwrite", &self.overwrite)
            .finish()
    }
}

/// A builder for [`DownloadInput`](crate::operation::download::DownloadInput).
#[non_exhaustive]
#[derive(Clone, Default)]
pub struct DownloadInputBuilder {
    pub(crate) url: Option<String>,
    pub(crate) destination: Option<PathBuf>,
    pub(crate) overwrite: bool,
    pub(crate) progress: Option<Arc<dyn ProgressListener>>,
}

impl DownloadInputBuilder {
    /// The presigned `GET` URL to download from.
    ///
    /// This member is required.
    pub fn url(mut self, input: impl Into<String>) -> Self {
        self.url = Some(input.into());
        self
    }

    /// The presigned `GET` URL to download from.
    pub fn set_url(mut self, input: Option<String>) -> Self {
        self.url = input;
        self
    }

    /// The presigned `GET` URL to download from.
    pub fn get_url(&self) -> &Option<String> {
        &self.url
    }

    /// Where to save the object.
    pub fn destination(mut self, input: impl AsRef<Path>) -> Self {
        self.destination = Some(input.as_ref().to_path_buf());
        self
    }

    /// Where to save the object.
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// Where to save the object.
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }

    /// Allow replacing an existing file at the destination. Default is `false`.
    pub fn overwrite(mut self, input: bool) -> Self {
        self.overwrite = input;
        self
    }

    /// Allow replacing an existing file at the destination.
    pub fn get_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Listener notified as the object is received.
    pub fn progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.progress = Some(listener);
        self
    }

    /// Consumes the builder and constructs a [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn build(self) -> Result<DownloadInput, error::Error> {
        let url = self
            .url
            .ok_or_else(|| error::invalid_input("a presigned URL is required"))?;
        Ok(DownloadInput {
            url,
            destination: self.destination,
            overwrite: self.overwrite,
            progress: self.progress,
        })
    }
}

impl fmt::Debug for DownloadInputBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadInputBuilder")
            .field("url", &self.url.as_ref().map(|_| "*** Sensitive Data Redacted ***"))
            .field("destination", &self.destination)
            .field("overwrite", &self.overwrite)
            .finish()
    }
}
