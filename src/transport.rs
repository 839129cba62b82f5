//! The HTTP transport seam.
//!
//! The request core never talks to the network directly. It hands a fully built
//! [`TransportRequest`] to a [`Transport`] and receives the whole response envelope
//! back. [`ReqwestTransport`] is the default implementation.
//!
//! A transport reports only failures to obtain a response (connection refused,
//! timeout, TLS). Non-2xx statuses come back as ordinary responses; the request
//! core decides what they mean.

use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// An outbound request, ready to send.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body, for `POST`, `PUT`, and `PATCH`.
    pub body: Option<serde_json::Value>,
}

/// A response envelope as received from the server.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the response envelope.
pub trait Transport {
    /// Failure to obtain any response at all.
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    type Error = T::Error;

    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send {
        self.as_ref().send(request)
    }
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
    /// Optional per-request timeout
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom TLS roots.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a timeout for all future requests.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = Some(timeout);
        this
    }

    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Transport for ReqwestTransport {
    type Error = reqwest::Error;

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, reqwest::Error> {
        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! An in-memory transport that records requests and replays canned responses.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    pub struct ConnectionRefused;

    #[derive(Debug)]
    enum Canned {
        Response(TransportResponse),
        Refused,
    }

    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        requests: Mutex<Vec<TransportRequest>>,
        responses: Mutex<VecDeque<Canned>>,
    }

    impl RecordingTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, status: u16, body: &str) {
            let response = TransportResponse {
                status: StatusCode::from_u16(status).unwrap(),
                headers: HeaderMap::new(),
                body: body.as_bytes().to_vec(),
            };
            self.responses
                .lock()
                .unwrap()
                .push_back(Canned::Response(response));
        }

        pub fn refuse(&self) {
            self.responses.lock().unwrap().push_back(Canned::Refused);
        }

        pub fn requests(&self) -> Vec<TransportRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last(&self) -> TransportRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl Transport for RecordingTransport {
        type Error = ConnectionRefused;

        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, ConnectionRefused> {
            self.requests.lock().unwrap().push(request);
            // An empty queue answers 200 with an empty body.
            let canned = self.responses.lock().unwrap().pop_front();
            match canned {
                Some(Canned::Response(response)) => Ok(response),
                Some(Canned::Refused) => Err(ConnectionRefused),
                None => Ok(TransportResponse {
                    status: StatusCode::OK,
                    headers: HeaderMap::new(),
                    body: Vec::new(),
                }),
            }
        }
    }
}
