/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::io;
use std::path::Path;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// Only local problems are reported as an `Error`. Anything the remote end says (or fails to
/// say) about a transfer is reported as a [`TransferOutcome`](crate::types::TransferOutcome)
/// instead.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues (e.g. a missing or malformed URL)
    InputInvalid,

    /// The local file to upload does not exist
    FileNotFound,

    /// The local file to upload exists but cannot be read
    NotReadable,

    /// The download destination cannot be written to
    DestinationInvalid,

    /// The download destination already exists and overwriting was not allowed
    DestinationExists,

    /// I/O errors
    IOError,

    /// A presigned URL could not be generated
    PresignFailed,

    /// Object metadata could not be retrieved from S3
    ObjectNotDiscoverable,

    /// Some kind of internal runtime issue (e.g. the HTTP client could not be constructed)
    RuntimeError,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if this error was raised by local validation, before any request was sent.
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InputInvalid
                | ErrorKind::FileNotFound
                | ErrorKind::NotReadable
                | ErrorKind::DestinationInvalid
                | ErrorKind::DestinationExists
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input: {}", self.source),
            ErrorKind::FileNotFound => write!(f, "file not found: {}", self.source),
            ErrorKind::NotReadable => write!(f, "file not readable: {}", self.source),
            ErrorKind::DestinationInvalid => write!(f, "invalid destination: {}", self.source),
            ErrorKind::DestinationExists => {
                write!(f, "destination already exists: {}", self.source)
            }
            ErrorKind::IOError => write!(f, "I/O error: {}", self.source),
            ErrorKind::PresignFailed => {
                write!(f, "failed to generate presigned URL: {}", self.source)
            }
            ErrorKind::ObjectNotDiscoverable => {
                write!(f, "object discovery failed: {}", self.source)
            }
            ErrorKind::RuntimeError => write!(f, "runtime error: {}", self.source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn presign_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::PresignFailed, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

/// Map an I/O error raised while opening or inspecting the file to upload.
pub(crate) fn local_file(path: &Path, err: io::Error) -> Error {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::FileNotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::NotReadable,
        _ => ErrorKind::IOError,
    };
    Error::new(kind, format!("{}: {err}", path.display()))
}

/// Map an I/O error raised while preparing the download destination.
pub(crate) fn destination(path: &Path, err: io::Error) -> Error {
    let kind = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ErrorKind::DestinationInvalid
        }
        io::ErrorKind::AlreadyExists => ErrorKind::DestinationExists,
        _ => ErrorKind::IOError,
    };
    Error::new(kind, format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{local_file, Error, ErrorKind};
    use std::io;
    use std::path::Path;

    #[test]
    fn test_local_file_error_kinds() {
        let path = Path::new("missing.bin");
        let err = local_file(path, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(&ErrorKind::FileNotFound, err.kind());
        assert!(err.is_local_validation());

        let err = local_file(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(&ErrorKind::NotReadable, err.kind());
        assert!(err.to_string().contains("missing.bin"));
    }

    #[test]
    fn test_io_errors_are_not_validation_failures() {
        let err: Error = io::Error::other("disk on fire").into();
        assert_eq!(&ErrorKind::IOError, err.kind());
        assert!(!err.is_local_validation());
    }
}
