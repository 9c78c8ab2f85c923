/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::Config;
use std::sync::Arc;

/// Transfer client for Amazon S3 presigned URLs.
///
/// The client holds no credentials. Every operation sends exactly one transfer request to the
/// presigned URL it is given.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    pub(crate) fn http_client(&self) -> &reqwest::Client {
        self.config.http_client()
    }
}

impl Client {
    /// Creates a new client from a transfer config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Upload a single local file through a presigned `PUT` URL.
    ///
    /// Constructs a fluent builder for the
    /// [`Upload`](crate::operation::upload::builders::UploadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn upload_file(
    ///     client: &s3_presigned_transfer::Client,
    ///     url: &str,
    /// ) -> Result<bool, s3_presigned_transfer::error::Error> {
    ///     let output = client.upload()
    ///         .url(url)
    ///         .path("photos/cat.jpg")
    ///         .send()
    ///         .await?;
    ///     Ok(output.outcome().is_success())
    /// }
    /// ```
    pub fn upload(&self) -> crate::operation::upload::builders::UploadFluentBuilder {
        crate::operation::upload::builders::UploadFluentBuilder::new(self.handle.clone())
    }

    /// Download a single object through a presigned `GET` URL.
    ///
    /// Constructs a fluent builder for the
    /// [`Download`](crate::operation::download::builders::DownloadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn download_file(
    ///     client: &s3_presigned_transfer::Client,
    ///     url: &str,
    /// ) -> Result<(), s3_presigned_transfer::error::Error> {
    ///     let output = client.download()
    ///         .url(url)
    ///         .destination("/tmp/cat.jpg")
    ///         .overwrite(true)
    ///         .send()
    ///         .await?;
    ///     println!("{:?}", output.outcome());
    ///     Ok(())
    /// }
    /// ```
    pub fn download(&self) -> crate::operation::download::builders::DownloadFluentBuilder {
        crate::operation::download::builders::DownloadFluentBuilder::new(self.handle.clone())
    }
}
