/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Stub presigned URL endpoint
//!
//! A local HTTP server that answers each HTTP method with a canned response and records
//! every request it receives, so transfers through presigned URLs can be tested without
//! network access or AWS credentials.

mod error;
mod server;

pub use error::Error;
pub use error::Result;
pub use hyper::Method;
pub use server::{RecordedRequest, ServerHandle, StubResponse, StubServer, StubServerBuilder};

/// Address of a local port with nothing listening on it.
///
/// The port is bound and released again, so connecting to it fails straight away.
pub async fn unused_local_addr() -> Result<std::net::SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?)
}

/// Serve a `200 OK` that announces `declared_len` body bytes but closes the connection
/// after sending only `body`.
///
/// Every connection gets the same treatment, so a download through it is always cut off
/// mid-body. The listener runs until the test runtime shuts down.
pub async fn truncated_body_server(
    declared_len: u64,
    body: &'static [u8],
) -> Result<std::net::SocketAddr> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    tracing::error!("truncated body server failed to accept: {err}");
                    return;
                }
            };
            tokio::spawn(async move {
                // requests carry no body, the headers end the request
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = format!(
                    "HTTP/1.1 200 OK\r\ncontent-length: {declared_len}\r\nconnection: close\r\n\r\n"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(body).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    Ok(addr)
}
