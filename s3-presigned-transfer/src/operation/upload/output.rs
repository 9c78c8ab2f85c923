/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::io::FileInfo;
use crate::types::TransferOutcome;

/// Output from uploading a file through a presigned URL
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOutput {
    pub(crate) outcome: TransferOutcome,
    pub(crate) content_type: String,
    pub(crate) file_info: FileInfo,
}

impl UploadOutput {
    /// The classified result of the `PUT` request
    pub fn outcome(&self) -> &TransferOutcome {
        &self.outcome
    }

    /// The `Content-Type` header that was sent
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The inspected local file
    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }
}
