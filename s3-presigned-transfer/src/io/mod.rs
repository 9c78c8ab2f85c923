/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Local file inspection (size and MIME type)
pub mod inspect;

/// Transfer progress reporting
pub mod progress;

pub(crate) mod partial_file;

// re-exports
pub use self::inspect::{inspect, mime_from_extension, FileInfo};
pub use self::progress::{NoProgress, ProgressListener};
