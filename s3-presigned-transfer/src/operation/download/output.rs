/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use super::ObjectMetadata;
use crate::types::TransferOutcome;

/// Output from downloading an object through a presigned URL
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadOutput {
    pub(crate) outcome: TransferOutcome,
    pub(crate) destination: PathBuf,
    pub(crate) object_meta: Option<ObjectMetadata>,
}

impl DownloadOutput {
    /// The classified result of the `GET` request
    pub fn outcome(&self) -> &TransferOutcome {
        &self.outcome
    }

    /// The resolved destination path.
    ///
    /// The file only exists when [`outcome`](Self::outcome) is a success.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Metadata reported by the probe request, when it was sent and answered
    pub fn object_meta(&self) -> Option<&ObjectMetadata> {
        self.object_meta.as_ref()
    }
}
