/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use crate::error::{self, ErrorKind};

/// Config loader
pub mod loader;

/// Default size of the chunks a file is read in while uploading
pub(crate) const DEFAULT_READ_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    probe_metadata: bool,
    read_chunk_size: usize,
    http_client: reqwest::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Maximum time allowed to establish a connection, if any.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Maximum time allowed between two reads from the connection, if any.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Whether downloads issue a `HEAD` request for the object size and type before the `GET`.
    pub fn probe_metadata(&self) -> bool {
        self.probe_metadata
    }

    /// Size of the chunks a file is streamed in while uploading.
    pub fn read_chunk_size(&self) -> usize {
        self.read_chunk_size
    }

    /// The HTTP client used to send transfer requests.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone)]
pub struct Builder {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    probe_metadata: bool,
    read_chunk_size: usize,
    http_client: Option<reqwest::Client>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            read_timeout: None,
            probe_metadata: true,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            http_client: None,
        }
    }
}

impl Builder {
    /// Maximum time allowed to establish a connection.
    ///
    /// Default is unset, leaving the HTTP client's own connection behavior in place.
    /// Ignored when an explicit [`http_client`](Self::http_client) is set.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Maximum time allowed between two reads from the connection.
    ///
    /// This is an idle timeout, a large object that keeps arriving is never cut off.
    /// Ignored when an explicit [`http_client`](Self::http_client) is set.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Enable or disable the metadata probe sent before each download. Default is enabled.
    pub fn probe_metadata(mut self, probe: bool) -> Self {
        self.probe_metadata = probe;
        self
    }

    /// Size of the chunks a file is streamed in while uploading.
    ///
    /// Values of zero are replaced with the default of 64 KiB.
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = if size == 0 {
            DEFAULT_READ_CHUNK_SIZE
        } else {
            size
        };
        self
    }

    /// Set an explicit HTTP client to use.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, error::Error> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(timeout) = self.read_timeout {
                    builder = builder.read_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(error::from_kind(ErrorKind::RuntimeError))?
            }
        };

        Ok(Config {
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            probe_metadata: self.probe_metadata,
            read_chunk_size: self.read_chunk_size,
            http_client,
        })
    }
}
