/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{self, ErrorKind};

/// A download written next to its destination and moved into place once committed.
///
/// The staging file is removed on drop unless committed, so early returns, errors and a
/// download future dropped mid-transfer (e.g. on Ctrl-C) never leave anything behind. An
/// existing file at the destination is only replaced by a committed download.
#[derive(Debug)]
pub(crate) struct PartialFile {
    path: PathBuf,
    staging_path: PathBuf,
    file: Option<fs::File>,
    committed: bool,
}

impl PartialFile {
    /// Create the staging file for a download to `path`.
    ///
    /// Any failure means the destination directory cannot be written to and is reported as
    /// [`DestinationInvalid`](ErrorKind::DestinationInvalid).
    pub(crate) async fn create(path: &Path) -> Result<Self, error::Error> {
        let staging_path = staging_path(path);
        let file = fs::File::create(&staging_path).await.map_err(|err| {
            error::Error::new(
                ErrorKind::DestinationInvalid,
                format!("cannot write to {}: {err}", staging_path.display()),
            )
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            staging_path,
            file: Some(file),
            committed: false,
        })
    }

    pub(crate) async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(buf).await,
            None => Err(std::io::Error::other("partial file already closed")),
        }
    }

    /// Flush the staged file and move it to the destination. Returns the final size.
    pub(crate) async fn commit(mut self) -> std::io::Result<u64> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        fs::rename(&self.staging_path, &self.path).await?;
        self.committed = true;
        Ok(fs::metadata(&self.path).await?.len())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // close the handle before unlinking
        drop(self.file.take());
        match std::fs::remove_file(&self.staging_path) {
            Ok(()) => tracing::debug!(
                "removed partial download {}",
                self.staging_path.display()
            ),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(
                "failed to remove partial download {}: {err}",
                self.staging_path.display()
            ),
        }
    }
}

/// `dir/name` -> `dir/.name.part`
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}
