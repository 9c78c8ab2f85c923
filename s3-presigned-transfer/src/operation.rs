/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error;

/// Types for single object upload operation
pub mod upload;

/// Types for single object download operation
pub mod download;

/// Turn a presigned URL into a request target.
///
/// The URL is only checked for being an absolute `http(s)` URL. Its query string (which carries
/// the signature) is left exactly as given.
pub(crate) fn request_target(url: &str) -> Result<reqwest::Url, error::Error> {
    let url = url.trim();
    if url.is_empty() {
        return Err(error::invalid_input("presigned URL is empty"));
    }
    let parsed = reqwest::Url::parse(url)
        .map_err(|err| error::invalid_input(format!("malformed presigned URL: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(error::invalid_input(format!(
            "unsupported URL scheme '{other}', expected http or https"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::request_target;
    use crate::error::ErrorKind;

    #[test]
    fn test_request_target_keeps_signature_intact() {
        let url = "https://bucket.s3.amazonaws.com/a/b/report.pdf?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Credential=AKIA%2F20250101%2Fus-east-1%2Fs3%2Faws4_request&X-Amz-Signature=abc123";
        let target = request_target(url).unwrap();
        assert_eq!(url, target.as_str());
    }

    #[test]
    fn test_request_target_rejects_bad_urls() {
        for url in ["", "   ", "not a url", "ftp://bucket/key", "/relative/path"] {
            let err = request_target(url).unwrap_err();
            assert_eq!(&ErrorKind::InputInvalid, err.kind(), "{url}");
        }
    }
}
