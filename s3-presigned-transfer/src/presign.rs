/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, Local};

use crate::error::{self, ErrorKind};
use crate::operation::download::ObjectMetadata;
use crate::types::TransferMethod;

/// Default validity of an issued URL (1 hour)
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(3600);

/// Longest validity SigV4 allows for a presigned URL (7 days)
pub const MAX_EXPIRATION: Duration = Duration::from_secs(604_800);

/// Parameters of a presigned URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignRequest {
    method: TransferMethod,
    bucket: String,
    key: String,
    expires_in: Duration,
    content_type: Option<String>,
    download_filename: Option<String>,
}

impl PresignRequest {
    /// A request for a `PUT` URL uploading to `bucket`/`key`
    pub fn put(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(TransferMethod::Put, bucket.into(), key.into())
    }

    /// A request for a `GET` URL downloading `bucket`/`key`
    pub fn get(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(TransferMethod::Get, bucket.into(), key.into())
    }

    fn new(method: TransferMethod, bucket: String, key: String) -> Self {
        Self {
            method,
            bucket,
            key,
            expires_in: DEFAULT_EXPIRATION,
            content_type: None,
            download_filename: None,
        }
    }

    /// How long the URL stays valid. Default is [`DEFAULT_EXPIRATION`].
    pub fn expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Content type the upload must be sent with. Only used for `PUT` URLs.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// File name suggested to browsers downloading the object. Only used for `GET` URLs.
    pub fn download_filename(mut self, filename: impl Into<String>) -> Self {
        self.download_filename = Some(filename.into());
        self
    }

    /// The HTTP method the URL authorizes
    pub fn method(&self) -> TransferMethod {
        self.method
    }

    /// The bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Validity of the URL
    pub fn expiration(&self) -> Duration {
        self.expires_in
    }

    /// Content type signed into a `PUT` URL, if any
    pub fn get_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Suggested download file name for a `GET` URL, if any
    pub fn get_download_filename(&self) -> Option<&str> {
        self.download_filename.as_deref()
    }

    fn validate(&self) -> Result<(), error::Error> {
        if self.bucket.is_empty() {
            return Err(error::invalid_input("bucket name must not be empty"));
        }
        if self.key.is_empty() {
            return Err(error::invalid_input("object key must not be empty"));
        }
        validate_expiration(self.expires_in)
    }
}

/// A URL authorizing one HTTP method on one object until it expires.
#[derive(Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    url: String,
    method: TransferMethod,
    expires_in: Duration,
}

impl PresignedUrl {
    /// The full URL including its signature
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The HTTP method the URL authorizes
    pub fn method(&self) -> TransferMethod {
        self.method
    }

    /// How long the URL was issued for
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Consume and return the URL string
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl fmt::Debug for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresignedUrl")
            .field("url", &"*** Sensitive Data Redacted ***")
            .field("method", &self.method)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Something that can mint presigned URLs.
///
/// Implementations hold whatever credentials are needed. Transfers only ever see the
/// resulting URL.
#[async_trait]
pub trait IssuePresignedUrl: Send + Sync {
    /// Issue a URL for `request`
    async fn issue_presigned_url(
        &self,
        request: &PresignRequest,
    ) -> Result<PresignedUrl, error::Error>;
}

/// Issues presigned URLs with an Amazon S3 client.
#[derive(Debug, Clone)]
pub struct S3UrlIssuer {
    client: aws_sdk_s3::Client,
}

impl S3UrlIssuer {
    /// Create an issuer from an existing S3 client
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Create an issuer using credentials and region from the standard AWS environment
    pub async fn from_env() -> Self {
        let config = aws_config::from_env().load().await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }

    /// The underlying S3 client
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }

    /// Look up an object's metadata with a `HeadObject` request.
    ///
    /// Returns `Ok(None)` when the object does not exist.
    pub async fn object_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectMetadata>, error::Error> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(Some(output.into())),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(None),
            Err(err) => Err(error::Error::new(ErrorKind::ObjectNotDiscoverable, err)),
        }
    }
}

#[async_trait]
impl IssuePresignedUrl for S3UrlIssuer {
    async fn issue_presigned_url(
        &self,
        request: &PresignRequest,
    ) -> Result<PresignedUrl, error::Error> {
        request.validate()?;
        let presigning = PresigningConfig::expires_in(request.expires_in)
            .map_err(error::invalid_input)?;

        let presigned = match request.method {
            TransferMethod::Put => self
                .client
                .put_object()
                .bucket(&request.bucket)
                .key(&request.key)
                .set_content_type(request.content_type.clone())
                .presigned(presigning)
                .await
                .map_err(error::presign_failed)?,
            TransferMethod::Get => self
                .client
                .get_object()
                .bucket(&request.bucket)
                .key(&request.key)
                .set_response_content_disposition(
                    request
                        .download_filename
                        .as_deref()
                        .map(content_disposition),
                )
                .presigned(presigning)
                .await
                .map_err(error::presign_failed)?,
        };

        tracing::debug!(
            "issued presigned {} URL for s3://{}/{} valid for {:?}",
            request.method,
            request.bucket,
            request.key,
            request.expires_in
        );
        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: request.method,
            expires_in: request.expires_in,
        })
    }
}

fn content_disposition(filename: &str) -> String {
    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{escaped}\"")
}

/// Check that `expires_in` is a validity S3 accepts for a presigned URL.
pub fn validate_expiration(expires_in: Duration) -> Result<(), error::Error> {
    if expires_in < Duration::from_secs(1) {
        return Err(error::invalid_input("expiration must be at least 1 second"));
    }
    if expires_in > MAX_EXPIRATION {
        return Err(error::invalid_input(format!(
            "expiration of {} seconds exceeds the maximum of {} seconds (7 days)",
            expires_in.as_secs(),
            MAX_EXPIRATION.as_secs()
        )));
    }
    Ok(())
}

/// Object key used for uploads when none is given: `uploads/file-YYYYMMDD-HHMMSS`
pub fn default_object_key() -> String {
    default_object_key_at(Local::now())
}

pub(crate) fn default_object_key_at(now: DateTime<Local>) -> String {
    format!("uploads/file-{}", now.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::{
        content_disposition, default_object_key_at, validate_expiration, IssuePresignedUrl,
        PresignRequest, S3UrlIssuer, MAX_EXPIRATION,
    };
    use crate::error::ErrorKind;
    use crate::types::TransferMethod;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use chrono::{Local, TimeZone};
    use std::time::Duration;

    fn offline_issuer() -> S3UrlIssuer {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new(
                "AKIDEXAMPLE",
                "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
                None,
                None,
                "test",
            ))
            .build();
        S3UrlIssuer::new(aws_sdk_s3::Client::from_conf(config))
    }

    #[test]
    fn test_expiration_bounds() {
        assert!(validate_expiration(Duration::from_secs(1)).is_ok());
        assert!(validate_expiration(MAX_EXPIRATION).is_ok());

        let err = validate_expiration(Duration::ZERO).unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
        let err = validate_expiration(MAX_EXPIRATION + Duration::from_secs(1)).unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    #[test]
    fn test_default_object_key() {
        let now = Local.with_ymd_and_hms(2025, 11, 30, 23, 59, 58).unwrap();
        assert_eq!("uploads/file-20251130-235958", default_object_key_at(now));
    }

    #[test]
    fn test_content_disposition_quotes_filename() {
        assert_eq!(
            r#"attachment; filename="my \"best\" photo.jpg""#,
            content_disposition(r#"my "best" photo.jpg"#)
        );
    }

    #[tokio::test]
    async fn test_presign_put_with_content_type() {
        let issuer = offline_issuer();
        let request = PresignRequest::put("my-bucket", "uploads/document.pdf")
            .content_type("application/pdf");
        let url = issuer.issue_presigned_url(&request).await.unwrap();

        assert_eq!(TransferMethod::Put, url.method());
        assert_eq!(Duration::from_secs(3600), url.expires_in());
        let url = url.as_str();
        assert!(url.starts_with("https://my-bucket.s3."));
        assert!(url.contains("/uploads/document.pdf?"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("content-type"));
    }

    #[tokio::test]
    async fn test_presign_get_with_filename() {
        let issuer = offline_issuer();
        let request = PresignRequest::get("my-bucket", "data/report.xlsx")
            .expires_in(Duration::from_secs(300))
            .download_filename("report-2025.xlsx");
        let url = issuer.issue_presigned_url(&request).await.unwrap();

        let url = url.as_str();
        assert!(url.contains("X-Amz-Expires=300"));
        assert!(url.contains("response-content-disposition=attachment"));
    }

    #[tokio::test]
    async fn test_presign_rejects_invalid_requests() {
        let issuer = offline_issuer();

        let request = PresignRequest::get("my-bucket", "k").expires_in(Duration::from_secs(0));
        let err = issuer.issue_presigned_url(&request).await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());

        let request = PresignRequest::put("my-bucket", "");
        let err = issuer.issue_presigned_url(&request).await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
