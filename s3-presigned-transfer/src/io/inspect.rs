/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::error;

/// MIME type used when neither the content nor the extension identify a file
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Number of leading bytes read for content sniffing
const SNIFF_LEN: u64 = 8 * 1024;

/// Size and type of a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    path: PathBuf,
    size_bytes: u64,
    content_type: String,
}

impl FileInfo {
    /// The inspected path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exact length of the file in bytes
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Detected MIME type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Resolve the size and MIME type of the file at `path`.
///
/// The MIME type is sniffed from the leading bytes of the file first. When the content is not
/// recognized, [`mime_from_extension`] is used instead.
///
/// # Errors
///
/// * [`FileNotFound`](error::ErrorKind::FileNotFound) if `path` does not resolve
/// * [`NotReadable`](error::ErrorKind::NotReadable) if the file cannot be opened for reading
/// * [`InputInvalid`](error::ErrorKind::InputInvalid) if `path` is not a regular file
pub async fn inspect(path: impl AsRef<Path>) -> Result<FileInfo, error::Error> {
    let path = path.as_ref();
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|err| error::local_file(path, err))?;
    if !meta.is_file() {
        return Err(error::invalid_input(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| error::local_file(path, err))?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut head)
        .await
        .map_err(|err| error::local_file(path, err))?;

    let content_type = match infer::get(&head) {
        Some(kind) => kind.mime_type(),
        None => mime_from_extension(path),
    };
    tracing::debug!(
        "inspected {}: {} bytes, content type {content_type}",
        path.display(),
        meta.len()
    );

    Ok(FileInfo {
        path: path.to_path_buf(),
        size_bytes: meta.len(),
        content_type: content_type.to_owned(),
    })
}

/// Guess a MIME type from the extension of `path`, ignoring case.
///
/// Unknown or missing extensions map to [`DEFAULT_CONTENT_TYPE`].
pub fn mime_from_extension(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("mp4") => "video/mp4",
        Some("mp3") => "audio/mpeg",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::{inspect, mime_from_extension, DEFAULT_CONTENT_TYPE};
    use crate::error::ErrorKind;

    #[test]
    fn test_extension_table() {
        assert_eq!("image/jpeg", mime_from_extension("photo.JPG"));
        assert_eq!("image/jpeg", mime_from_extension("a/b/photo.jpeg"));
        assert_eq!("image/png", mime_from_extension("x.png"));
        assert_eq!("image/gif", mime_from_extension("x.gif"));
        assert_eq!("application/pdf", mime_from_extension("x.Pdf"));
        assert_eq!("text/plain", mime_from_extension("x.txt"));
        assert_eq!("application/json", mime_from_extension("x.json"));
        assert_eq!("application/xml", mime_from_extension("x.xml"));
        assert_eq!("application/zip", mime_from_extension("x.zip"));
        assert_eq!(DEFAULT_CONTENT_TYPE, mime_from_extension("unknownext.xyz"));
        assert_eq!(DEFAULT_CONTENT_TYPE, mime_from_extension("Makefile"));
    }

    #[tokio::test]
    async fn test_inspect_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        tokio::fs::write(&path, b"not really a jpeg").await.unwrap();

        let info = inspect(&path).await.unwrap();
        assert_eq!(17, info.size_bytes());
        assert_eq!("image/jpeg", info.content_type());

        let path = dir.path().join("unknownext.xyz");
        tokio::fs::write(&path, b"").await.unwrap();
        let info = inspect(&path).await.unwrap();
        assert_eq!(0, info.size_bytes());
        assert_eq!(DEFAULT_CONTENT_TYPE, info.content_type());
    }

    #[tokio::test]
    async fn test_inspect_sniffs_content() {
        let dir = tempfile::tempdir().unwrap();
        // PNG signature behind a misleading extension
        let path = dir.path().join("image.txt");
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
        tokio::fs::write(&path, png).await.unwrap();

        let info = inspect(&path).await.unwrap();
        assert_eq!("image/png", info.content_type());
        assert_eq!(png.len() as u64, info.size_bytes());
    }

    #[tokio::test]
    async fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(dir.path().join("nope.bin")).await.unwrap_err();
        assert_eq!(&ErrorKind::FileNotFound, err.kind());
    }

    #[tokio::test]
    async fn test_inspect_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(dir.path()).await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
