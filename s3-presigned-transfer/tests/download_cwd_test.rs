/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

// Changes the process working directory, so it lives in its own test binary.

use std::path::Path;

use test_common::{Method, StubResponse, StubServer};

#[tokio::test]
async fn test_download_without_destination_lands_in_current_directory() {
    let server = StubServer::builder()
        .respond(Method::GET, StubResponse::ok_with_body("id,total\n1,42\n"))
        .build()
        .start()
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let config = s3_presigned_transfer::from_env().load().unwrap();
    let result = s3_presigned_transfer::Client::new(config)
        .download()
        .url(server.url(
            "/my-bucket/data/summary.csv?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Signature=abc123",
        ))
        .send()
        .await;
    std::env::set_current_dir(previous).unwrap();

    let output = result.unwrap();
    assert!(output.outcome().is_success());
    assert_eq!(Path::new("summary.csv"), output.destination());
    assert_eq!(
        b"id,total\n1,42\n".to_vec(),
        std::fs::read(dir.path().join("summary.csv")).unwrap()
    );
    assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());
}
