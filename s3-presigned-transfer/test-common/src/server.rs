/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Stub server implementation.

use crate::error::{Error, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Canned response returned for one HTTP method.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl StubResponse {
    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// A `200 OK` response carrying `body`.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::status(200).body(body)
    }

    /// An S3 style XML error document with the given status and error code.
    pub fn s3_error(status: u16, code: &str) -> Self {
        Self::status(status)
            .header("content-type", "application/xml")
            .body(format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Error><Code>{code}</Code></Error>"
            ))
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a response header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn to_response(&self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body.clone()));
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().append(name, value);
            }
        }
        response
    }
}

/// A request received by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: Method,
    /// Request target, including the query string
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Full request body
    pub body: Bytes,
}

impl RecordedRequest {
    /// Value of a header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Handle for a running stub server.
#[derive(Debug)]
pub struct ServerHandle {
    /// Address the server is listening on.
    address: SocketAddr,

    /// Every request received so far.
    requests: RequestLog,

    /// Shutdown sender.
    shutdown_tx: oneshot::Sender<()>,

    /// Server task handle.
    server_task: JoinHandle<Result<()>>,
}

impl ServerHandle {
    /// Get the address the server is listening on
    pub fn socket_addr(&self) -> SocketAddr {
        self.address
    }

    /// URL for `path_and_query` on this server, e.g. `/bucket/key.txt?X-Amz-Signature=abc`.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.address, path_and_query)
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Requests received so far with the given method.
    pub fn requests_with_method(&self, method: Method) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method)
            .collect()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        match self.server_task.await {
            Ok(result) => result,
            Err(err) => Err(Error::Internal(format!("Server task failed: {}", err))),
        }
    }
}

/// Builder for [`StubServer`].
#[derive(Debug, Clone)]
pub struct StubServerBuilder {
    responses: HashMap<Method, StubResponse>,
    fallback: StubResponse,
}

impl Default for StubServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StubServerBuilder {
    /// Create a new builder. Methods without a configured response get `403 Forbidden`,
    /// which is what S3 answers when the method does not match the signed one.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fallback: StubResponse::s3_error(403, "SignatureDoesNotMatch"),
        }
    }

    /// Answer requests using `method` with `response`.
    pub fn respond(mut self, method: Method, response: StubResponse) -> Self {
        self.responses.insert(method, response);
        self
    }

    /// Build the server.
    pub fn build(self) -> StubServer {
        StubServer {
            responses: Arc::new(self.responses),
            fallback: self.fallback,
        }
    }
}

/// Stub server answering every request from a table of canned responses.
#[derive(Debug, Clone)]
pub struct StubServer {
    responses: Arc<HashMap<Method, StubResponse>>,
    fallback: StubResponse,
}

impl StubServer {
    /// Create a new [`StubServerBuilder`].
    pub fn builder() -> StubServerBuilder {
        StubServerBuilder::new()
    }

    /// Start the server on an available local port.
    pub async fn start(&self) -> Result<ServerHandle> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| Error::ServerStartFailed(format!("Failed to bind to address: {}", e)))?;

        let addr = listener
            .local_addr()
            .map_err(|e| Error::Internal(format!("Failed to get local address: {}", e)))?;

        tracing::info!("StubServer listening on {}", addr);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let requests: RequestLog = Arc::default();

        let server = self.clone();
        let log = requests.clone();
        let server_task = tokio::spawn(async move {
            loop {
                let (socket, _) = tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok(conn) => conn,
                            Err(err) => {
                                tracing::error!("error accepting connection: {err}");
                                continue;
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                };

                let server = server.clone();
                let log = log.clone();
                let service = hyper::service::service_fn(move |req| {
                    let server = server.clone();
                    let log = log.clone();
                    async move { server.handle(req, log).await }
                });
                tokio::spawn(async move {
                    let http_server = ConnBuilder::new(TokioExecutor::new());
                    if let Err(err) = http_server
                        .serve_connection(TokioIo::new(socket), service)
                        .await
                    {
                        tracing::debug!("connection closed with error: {err}");
                    }
                });
            }

            tracing::info!("server is stopped");
            Ok(())
        });

        Ok(ServerHandle {
            address: addr,
            requests,
            shutdown_tx,
            server_task,
        })
    }

    async fn handle(
        &self,
        req: Request<Incoming>,
        log: RequestLog,
    ) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                tracing::warn!("failed to read request body: {err}");
                return Ok(StubResponse::s3_error(400, "IncompleteBody").to_response());
            }
        };

        let response = self
            .responses
            .get(&parts.method)
            .unwrap_or(&self.fallback)
            .to_response();

        tracing::debug!(
            "{} {} -> {}",
            parts.method,
            parts.uri,
            response.status().as_u16()
        );
        let recorded = RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        };
        match log.lock() {
            Ok(mut requests) => requests.push(recorded),
            Err(poisoned) => poisoned.into_inner().push(recorded),
        }

        Ok(response)
    }
}
