/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use crate::config::Builder;
use crate::error;
use crate::Config;

/// Load transfer client [`Config`] from the environment.
///
/// Proxy settings (`HTTPS_PROXY`, `NO_PROXY`, ...) are picked up from the environment by the
/// underlying HTTP client.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
}

impl ConfigLoader {
    /// Maximum time allowed to establish a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.connect_timeout(timeout);
        self
    }

    /// Maximum time allowed between two reads from the connection.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.read_timeout(timeout);
        self
    }

    /// Enable or disable the metadata probe sent before each download.
    pub fn probe_metadata(mut self, probe: bool) -> Self {
        self.builder = self.builder.probe_metadata(probe);
        self
    }

    /// Load the default configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub fn load(self) -> Result<Config, error::Error> {
        self.builder.build()
    }
}
