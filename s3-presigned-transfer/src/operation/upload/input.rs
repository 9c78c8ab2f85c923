/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error;
use crate::io::ProgressListener;

/// Request type for uploading a single local file through a presigned `PUT` URL
#[non_exhaustive]
#[derive(Clone)]
pub struct UploadInput {
    /// The presigned `PUT` URL, passed through unmodified
    pub url: String,

    /// Path of the local file to upload
    pub path: PathBuf,

    /// Content type to send instead of the detected one
    pub content_type: Option<String>,

    pub(crate) progress: Option<Arc<dyn ProgressListener>>,
}

impl UploadInput {
    /// Creates a new builder-style object to manufacture [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn builder() -> UploadInputBuilder {
        UploadInputBuilder::default()
    }

    /// The presigned `PUT` URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path of the local file to upload
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content type override, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl fmt::Debug for UploadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadInput")
            .field("url", &"*** Sensitive Data Redacted ***")
            .field("path", &self.path)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A builder for [`UploadInput`](crate::operation::upload::UploadInput).
#[non_exhaustive]
#[derive(Clone, Default)]
pub struct UploadInputBuilder {
    pub(crate) url: Option<String>,
    pub(crate) path: Option<PathBuf>,
    pub(crate) content_type: Option<String>,
    pub(crate) progress: Option<Arc<dyn ProgressListener>>,
}

impl UploadInputBuilder {
    /// The presigned `PUT` URL to upload to.
    ///
    /// This member is required.
    pub fn url(mut self, input: impl Into<String>) -> Self {
        self.url = Some(input.into());
        self
    }

    /// The presigned `PUT` URL to upload to.
    pub fn set_url(mut self, input: Option<String>) -> Self {
        self.url = input;
        self
    }

    /// The presigned `PUT` URL to upload to.
    pub fn get_url(&self) -> &Option<String> {
        &self.url
    }

    /// Path of the local file to upload.
    ///
    /// This member is required.
    pub fn path(mut self, input: impl AsRef<Path>) -> Self {
        self.path = Some(input.as_ref().to_path_buf());
        self
    }

    /// Path of the local file to upload.
    pub fn set_path(mut self, input: Option<PathBuf>) -> Self {
        self.path = input;
        self
    }

    /// Path of the local file to upload.
    pub fn get_path(&self) -> &Option<PathBuf> {
        &self.path
    }

    /// Content type to send instead of the one detected from the file.
    ///
    /// It has to match the content type the URL was signed with, if any.
    pub fn content_type(mut self, input: impl Into<String>) -> Self {
        self.content_type = Some(input.into());
        self
    }

    /// Content type to send instead of the one detected from the file.
    pub fn set_content_type(mut self, input: Option<String>) -> Self {
        self.content_type = input;
        self
    }

    /// Content type to send instead of the one detected from the file.
    pub fn get_content_type(&self) -> &Option<String> {
        &self.content_type
    }

    /// Listener notified as the file is streamed.
    pub fn progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.progress = Some(listener);
        self
    }

    /// Consumes the builder and constructs a [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn build(self) -> Result<UploadInput, error::Error> {
        let url = self
            .url
            .ok_or_else(|| error::invalid_input("a presigned URL is required"))?;
        let path = self
            .path
            .ok_or_else(|| error::invalid_input("a file to upload is required"))?;
        Ok(UploadInput {
            url,
            path,
            content_type: self.content_type,
            progress: self.progress,
        })
    }
}

impl fmt::Debug for UploadInputBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadInputBuilder")
            .field("url", &self.url.as_ref().map(|_| "*** Sensitive Data Redacted ***"))
            .field("path", &self.path)
            .field("content_type", &self.content_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::UploadInput;
    use crate::error::ErrorKind;

    #[test]
    fn test_url_and_path_are_required() {
        let err = UploadInput::builder().path("a.txt").build().unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());

        let err = UploadInput::builder()
            .url("https://b.s3.amazonaws.com/k?sig=1")
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    #[test]
    fn test_debug_redacts_url() {
        let input = UploadInput::builder()
            .url("https://b.s3.amazonaws.com/k?X-Amz-Signature=secret")
            .path("a.txt")
            .build()
            .unwrap();
        let debug = format!("{input:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("a.txt"));
    }
}
