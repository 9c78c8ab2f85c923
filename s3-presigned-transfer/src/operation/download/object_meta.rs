/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_smithy_types::date_time::Format;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};

/// Object metadata other than the body, as reported by a `HEAD` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ObjectMetadata {
    /// Size of the object in bytes
    pub content_length: Option<u64>,
    /// MIME type stored with the object
    pub content_type: Option<String>,
    /// Last modification time, formatted as an HTTP date
    pub last_modified: Option<String>,
}

impl ObjectMetadata {
    /// Returns true if none of the fields are known
    pub fn is_empty(&self) -> bool {
        self.content_length.is_none() && self.content_type.is_none() && self.last_modified.is_none()
    }
}

impl From<&HeaderMap> for ObjectMetadata {
    fn from(headers: &HeaderMap) -> Self {
        let header_str = |name| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        Self {
            content_length: header_str(CONTENT_LENGTH).and_then(|len| len.parse().ok()),
            content_type: header_str(CONTENT_TYPE),
            last_modified: header_str(LAST_MODIFIED),
        }
    }
}

impl From<HeadObjectOutput> for ObjectMetadata {
    fn from(value: HeadObjectOutput) -> Self {
        Self {
            content_length: value.content_length.and_then(|len| u64::try_from(len).ok()),
            content_type: value.content_type,
            last_modified: value
                .last_modified
                .and_then(|date| date.fmt(Format::HttpDate).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectMetadata;
    use aws_sdk_s3::operation::head_object::HeadObjectOutput;
    use aws_smithy_types::DateTime;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));

        let meta = ObjectMetadata::from(&headers);
        assert_eq!(Some(1024), meta.content_length);
        assert_eq!(Some("text/csv"), meta.content_type.as_deref());
        assert_eq!(None, meta.last_modified);
        assert!(ObjectMetadata::from(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_from_head_object() {
        let output = HeadObjectOutput::builder()
            .content_length(15)
            .content_type("image/png")
            .last_modified(DateTime::from_secs(0))
            .build();
        let meta = ObjectMetadata::from(output);
        assert_eq!(Some(15), meta.content_length);
        assert_eq!(Some("image/png"), meta.content_type.as_deref());
        assert_eq!(
            Some("Thu, 01 Jan 1970 00:00:00 GMT"),
            meta.last_modified.as_deref()
        );
    }
}
