/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// Status recorded for a transfer that never received an HTTP response.
///
/// Shown to users as `000`, matching what command-line HTTP clients print when no connection
/// could be established.
pub const NO_RESPONSE_STATUS: u16 = 0;

/// The HTTP method a presigned URL authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferMethod {
    /// Upload (`PUT`) of one object
    Put,
    /// Download (`GET`) of one object
    Get,
}

impl TransferMethod {
    /// The HTTP method name
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransferMethod::Put => "PUT",
            TransferMethod::Get => "GET",
        }
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a transfer's HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `200`: the transfer completed
    Success,
    /// `400`: malformed presigned URL or content-type mismatch
    BadRequest,
    /// `403`: URL expired, invalid signature or insufficient bucket permission
    Forbidden,
    /// `404`: object or bucket does not exist
    NotFound,
    /// No HTTP response at all (DNS failure, unreachable host, dropped connection)
    ConnectionFailure,
    /// Any other status, surfaced verbatim
    Unknown,
}

impl Category {
    /// Classify an HTTP status code.
    ///
    /// Use [`NO_RESPONSE_STATUS`] for transfers that never received a response.
    pub const fn from_status(status: u16) -> Category {
        match status {
            200 => Category::Success,
            400 => Category::BadRequest,
            403 => Category::Forbidden,
            404 => Category::NotFound,
            NO_RESPONSE_STATUS => Category::ConnectionFailure,
            _ => Category::Unknown,
        }
    }

    /// Returns true for [`Category::Success`]
    pub const fn is_success(&self) -> bool {
        matches!(self, Category::Success)
    }

    /// A human readable explanation of this outcome for a transfer using `method`.
    pub const fn explain(&self, method: TransferMethod) -> &'static str {
        use Category::*;
        use TransferMethod::*;
        match (self, method) {
            (Success, Put) => "The file was uploaded successfully",
            (Success, Get) => "The file was downloaded successfully",
            (BadRequest, Put) => {
                "Bad request: the presigned URL is malformed or the Content-Type does not match the one it was signed with"
            }
            (BadRequest, Get) => "Bad request: the presigned URL is malformed",
            (Forbidden, _) => {
                "Access denied: the URL has expired, its signature is invalid or the bucket permissions are insufficient"
            }
            (NotFound, Put) => "Not found: the bucket does not exist",
            (NotFound, Get) => "Not found: the object or the bucket does not exist",
            (ConnectionFailure, _) => {
                "Connection failed: the network is unreachable, DNS resolution failed or the URL host cannot be reached"
            }
            (Unknown, _) => "Unexpected HTTP status",
        }
    }

    /// What the user can do about this outcome, if anything.
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Category::Success => None,
            Category::BadRequest => {
                Some("Check that the URL was copied completely and that the Content-Type matches")
            }
            Category::Forbidden => Some("Request a new presigned URL"),
            Category::NotFound => Some("Check the bucket name and object key"),
            Category::ConnectionFailure => Some("Check your network connection and the URL host"),
            Category::Unknown => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Success => "success",
            Category::BadRequest => "bad request",
            Category::Forbidden => "forbidden",
            Category::NotFound => "not found",
            Category::ConnectionFailure => "connection failure",
            Category::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Result of a single transfer that reached the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    method: TransferMethod,
    http_status: u16,
    category: Category,
    bytes_transferred: Option<u64>,
}

impl TransferOutcome {
    pub(crate) fn new(
        method: TransferMethod,
        http_status: u16,
        bytes_transferred: Option<u64>,
    ) -> Self {
        Self {
            method,
            http_status,
            category: Category::from_status(http_status),
            bytes_transferred,
        }
    }

    pub(crate) fn no_response(method: TransferMethod, bytes_transferred: Option<u64>) -> Self {
        Self::new(method, NO_RESPONSE_STATUS, bytes_transferred)
    }

    /// The method of the transfer this outcome describes
    pub fn method(&self) -> TransferMethod {
        self.method
    }

    /// The HTTP status, or [`NO_RESPONSE_STATUS`] when no response was received
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// The classification of [`http_status`](Self::http_status)
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of body bytes moved over the wire, when known
    pub fn bytes_transferred(&self) -> Option<u64> {
        self.bytes_transferred
    }

    /// Returns true if the transfer succeeded
    pub fn is_success(&self) -> bool {
        self.category.is_success()
    }

    /// Process exit code for a command-line front-end: `0` on success, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// The status formatted for display (`000` when there was no response)
    pub fn status_display(&self) -> String {
        format!("{:03}", self.http_status)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, TransferMethod, TransferOutcome, NO_RESPONSE_STATUS};

    #[test]
    fn test_classifier_is_total() {
        let statuses = std::iter::once(NO_RESPONSE_STATUS).chain(100..=599);
        for status in statuses {
            let category = Category::from_status(status);
            let expected = match status {
                0 => Category::ConnectionFailure,
                200 => Category::Success,
                400 => Category::BadRequest,
                403 => Category::Forbidden,
                404 => Category::NotFound,
                _ => Category::Unknown,
            };
            assert_eq!(expected, category, "status {status}");
        }
    }

    #[test]
    fn test_only_200_is_success() {
        assert!(Category::from_status(200).is_success());
        for status in [201, 204, 206, 301, 304, 500, 503] {
            assert_eq!(Category::Unknown, Category::from_status(status));
        }
    }

    #[test]
    fn test_not_found_explanation_depends_on_method() {
        let put = Category::NotFound.explain(TransferMethod::Put);
        let get = Category::NotFound.explain(TransferMethod::Get);
        assert!(put.contains("bucket"));
        assert!(get.contains("object"));
        assert_ne!(put, get);
    }

    #[test]
    fn test_forbidden_recommends_new_url() {
        assert_eq!(
            Some("Request a new presigned URL"),
            Category::Forbidden.remediation()
        );
        assert_eq!(None, Category::Success.remediation());
    }

    #[test]
    fn test_outcome_exit_codes() {
        let ok = TransferOutcome::new(TransferMethod::Put, 200, Some(10));
        assert_eq!(0, ok.exit_code());
        assert_eq!("200", ok.status_display());

        let expired = TransferOutcome::new(TransferMethod::Put, 403, None);
        assert_eq!(Category::Forbidden, expired.category());
        assert_eq!(1, expired.exit_code());

        let offline = TransferOutcome::no_response(TransferMethod::Get, None);
        assert_eq!(Category::ConnectionFailure, offline.category());
        assert_eq!("000", offline.status_display());
        assert_eq!(1, offline.exit_code());
    }
}
