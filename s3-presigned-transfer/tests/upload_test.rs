/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;

use s3_presigned_transfer::error::ErrorKind;
use s3_presigned_transfer::types::{Category, TransferMethod};
use test_common::{Method, StubResponse, StubServer};

const SIGNED_PATH: &str = "/my-bucket/uploads/photo.png?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Credential=AKID%2F20250101%2Fus-east-1%2Fs3%2Faws4_request&X-Amz-Date=20250101T000000Z&X-Amz-Expires=3600&X-Amz-SignedHeaders=content-type%3Bhost&X-Amz-Signature=0123456789abcdef";

fn client() -> s3_presigned_transfer::Client {
    let config = s3_presigned_transfer::from_env().load().unwrap();
    s3_presigned_transfer::Client::new(config)
}

fn png_file(dir: &tempfile::TempDir, name: &str) -> (PathBuf, Vec<u8>) {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend((0..200_000u32).map(|i| (i % 251) as u8));
    let path = dir.path().join(name);
    std::fs::write(&path, &data).unwrap();
    (path, data)
}

#[tokio::test]
async fn test_upload_success() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::status(200))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, data) = png_file(&dir, "photo.png");

    let output = client()
        .upload()
        .url(server.url(SIGNED_PATH))
        .path(&path)
        .send()
        .await
        .unwrap();

    let outcome = output.outcome();
    assert_eq!(TransferMethod::Put, outcome.method());
    assert_eq!(200, outcome.http_status());
    assert_eq!(Category::Success, outcome.category());
    assert_eq!(Some(data.len() as u64), outcome.bytes_transferred());
    assert_eq!(0, outcome.exit_code());
    assert_eq!("image/png", output.content_type());
    // the summary printed after an upload comes from here, the file is not inspected again
    assert_eq!(path.as_path(), output.file_info().path());
    assert_eq!(data.len() as u64, output.file_info().size_bytes());

    let requests = server.requests_with_method(Method::PUT);
    assert_eq!(1, requests.len());
    let put = &requests[0];
    assert_eq!(SIGNED_PATH, put.uri.to_string());
    assert_eq!(Some("image/png"), put.header("content-type"));
    assert_eq!(
        Some(data.len().to_string().as_str()),
        put.header("content-length")
    );
    assert_eq!(None, put.header("transfer-encoding"));
    assert_eq!(data, put.body.as_ref());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_upload_with_expired_url_is_forbidden() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::s3_error(403, "AccessDenied"))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = png_file(&dir, "photo.png");

    let output = client()
        .upload()
        .url(server.url(SIGNED_PATH))
        .path(&path)
        .send()
        .await
        .unwrap();

    let outcome = output.outcome();
    assert_eq!(403, outcome.http_status());
    assert_eq!(Category::Forbidden, outcome.category());
    assert_eq!(
        Some("Request a new presigned URL"),
        outcome.category().remediation()
    );
    assert_eq!(1, outcome.exit_code());
}

#[tokio::test]
async fn test_missing_file_sends_no_request() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::status(200))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = client()
        .upload()
        .url(server.url(SIGNED_PATH))
        .path(dir.path().join("missing.bin"))
        .send()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::FileNotFound, err.kind());
    assert!(err.is_local_validation());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_content_type_sends_no_request() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::status(200))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = png_file(&dir, "photo.png");

    let err = client()
        .upload()
        .url(server.url(SIGNED_PATH))
        .path(&path)
        .content_type("text/plain\r\nx-evil: 1")
        .send()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::InputInvalid, err.kind());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_content_type_override() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::status(200))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, b"a,b\n1,2\n").unwrap();

    let output = client()
        .upload()
        .url(server.url("/bucket/data.bin?X-Amz-Signature=abc"))
        .path(&path)
        .content_type("text/csv")
        .send()
        .await
        .unwrap();

    assert!(output.outcome().is_success());
    assert_eq!("text/csv", output.content_type());
    assert_eq!(
        Some("text/csv"),
        server.requests()[0].header("content-type")
    );
}

#[tokio::test]
async fn test_repeated_uploads_are_independent() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::status(200))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, data) = png_file(&dir, "photo.png");
    let client = client();

    for _ in 0..2 {
        let output = client
            .upload()
            .url(server.url(SIGNED_PATH))
            .path(&path)
            .send()
            .await
            .unwrap();
        assert_eq!(200, output.outcome().http_status());
    }

    let requests = server.requests_with_method(Method::PUT);
    assert_eq!(2, requests.len());
    assert!(requests.iter().all(|req| req.body.as_ref() == data.as_slice()));
}

#[tokio::test]
async fn test_unreachable_host_is_connection_failure() {
    let addr = test_common::unused_local_addr().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = png_file(&dir, "photo.png");

    let output = client()
        .upload()
        .url(format!("http://{addr}{SIGNED_PATH}"))
        .path(&path)
        .send()
        .await
        .unwrap();

    let outcome = output.outcome();
    assert_eq!(Category::ConnectionFailure, outcome.category());
    assert_eq!("000", outcome.status_display());
    assert_eq!(1, outcome.exit_code());
}

#[tokio::test]
async fn test_unknown_status_is_surfaced() {
    let server = StubServer::builder()
        .respond(Method::PUT, StubResponse::s3_error(503, "SlowDown"))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = png_file(&dir, "photo.png");

    let output = client()
        .upload()
        .url(server.url(SIGNED_PATH))
        .path(&path)
        .send()
        .await
        .unwrap();

    assert_eq!(503, output.outcome().http_status());
    assert_eq!(Category::Unknown, output.outcome().category());
    assert_eq!(1, output.outcome().exit_code());
}
