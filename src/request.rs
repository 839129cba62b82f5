//! The request core: the single path every outbound call takes.
//!
//! [`RequestCore`] resolves the access key for a call, builds the auth headers,
//! composes the URL as `host + path`, hands the request to the [`Transport`],
//! and unwraps the response body. Every verb shares the same failure mapping:
//!
//! - no resolvable access key: [`ConfigError::MissingAccessKey`], nothing is sent
//! - transport failure: [`RequestFailed::Transport`]
//! - non-2xx status: [`RequestFailed::HttpStatus`]
//! - body not matching the requested type: [`RequestFailed::JsonDeserialization`]
//!
//! Nothing is retried or cached. Two identical calls produce two identical requests.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokes_payments_types::{ClientConfig, ConfigError};
use url::Url;

use crate::error::{PaymentsError, RequestFailed};
use crate::telemetry::{record_result_on_span, with_request_span};
use crate::transport::{Transport, TransportRequest, TransportResponse};

pub const ACCESS_KEY_HEADER: HeaderName = HeaderName::from_static("accesskey");
pub const APP_KEY_HEADER: HeaderName = HeaderName::from_static("appkey");

/// Auth headers sent with every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeaders<'a> {
    pub accesskey: &'a str,
    pub appkey: &'a str,
}

impl RequestHeaders<'_> {
    /// Converts into a [`HeaderMap`]. `context` identifies the call in the error.
    pub fn to_header_map(&self, context: &str) -> Result<HeaderMap, RequestFailed> {
        let mut headers = HeaderMap::with_capacity(2);
        for (name, label, value) in [
            (ACCESS_KEY_HEADER, "accesskey", self.accesskey),
            (APP_KEY_HEADER, "appkey", self.appkey),
        ] {
            let value =
                HeaderValue::from_str(value).map_err(|source| RequestFailed::InvalidHeader {
                    context: context.to_string(),
                    name: label,
                    source,
                })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Shared request machinery for one validated [`ClientConfig`].
///
/// Cloning is cheap: the configuration is shared and never mutated.
#[derive(Clone, Debug)]
pub struct RequestCore<T> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T> RequestCore<T> {
    /// Validates `config` and binds it to `transport`.
    pub fn try_new(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The per-call key if one is given, otherwise the configured default.
    ///
    /// Fails with [`ConfigError::MissingAccessKey`] when neither exists.
    pub fn resolve_key<'a>(&'a self, per_call: Option<&'a str>) -> Result<&'a str, ConfigError> {
        per_call
            .or(self.config.api_key.as_deref())
            .ok_or(ConfigError::MissingAccessKey)
    }

    pub fn build_headers<'a>(&'a self, access_key: &'a str) -> RequestHeaders<'a> {
        RequestHeaders {
            accesskey: access_key,
            appkey: self.config.app_key(),
        }
    }

    /// `host + path`, concatenated verbatim.
    pub fn url_for(&self, path: &str) -> Result<Url, RequestFailed> {
        let url = format!("{}{}", self.config.host, path);
        Url::parse(&url).map_err(|source| RequestFailed::InvalidUrl { url, source })
    }
}

impl<T: Transport> RequestCore<T> {
    pub async fn get<R>(&self, path: &str, access_key: Option<&str>) -> Result<R, PaymentsError>
    where
        R: DeserializeOwned,
    {
        self.request(Method::GET, path, None, access_key).await
    }

    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        access_key: Option<&str>,
    ) -> Result<R, PaymentsError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = json_body(&Method::POST, path, body)?;
        self.request(Method::POST, path, Some(body), access_key).await
    }

    pub async fn put<B, R>(
        &self,
        path: &str,
        body: &B,
        access_key: Option<&str>,
    ) -> Result<R, PaymentsError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = json_body(&Method::PUT, path, body)?;
        self.request(Method::PUT, path, Some(body), access_key).await
    }

    pub async fn patch<B, R>(
        &self,
        path: &str,
        body: &B,
        access_key: Option<&str>,
    ) -> Result<R, PaymentsError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = json_body(&Method::PATCH, path, body)?;
        self.request(Method::PATCH, path, Some(body), access_key).await
    }

    pub async fn delete<R>(&self, path: &str, access_key: Option<&str>) -> Result<R, PaymentsError>
    where
        R: DeserializeOwned,
    {
        self.request(Method::DELETE, path, None, access_key).await
    }

    /// `DELETE` that hands back the whole response envelope instead of the body.
    pub async fn delete_raw(
        &self,
        path: &str,
        access_key: Option<&str>,
    ) -> Result<TransportResponse, PaymentsError> {
        self.request_raw(Method::DELETE, path, None, access_key).await
    }

    /// Sends one request and deserializes the response body into `R`.
    ///
    /// An empty body reads as JSON `null`; a body that is not JSON reads as a JSON string.
    pub async fn request<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        access_key: Option<&str>,
    ) -> Result<R, PaymentsError>
    where
        R: DeserializeOwned,
    {
        let span_method = method.clone();
        with_request_span(&span_method, path, async move {
            let context = format!("{method} {path}");
            let result = self
                .send(method, path, body, access_key, &context)
                .await
                .and_then(|response| unwrap_body(&context, &response).map_err(PaymentsError::from));
            record_result_on_span(&result);
            result
        })
        .await
    }

    /// Sends one request and returns the response envelope unmodified.
    ///
    /// Non-2xx statuses still fail with [`RequestFailed::HttpStatus`].
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        access_key: Option<&str>,
    ) -> Result<TransportResponse, PaymentsError> {
        let span_method = method.clone();
        with_request_span(&span_method, path, async move {
            let context = format!("{method} {path}");
            let result = self.send(method, path, body, access_key, &context).await;
            record_result_on_span(&result);
            result
        })
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        access_key: Option<&str>,
        context: &str,
    ) -> Result<TransportResponse, PaymentsError> {
        let access_key = self.resolve_key(access_key)?;
        let headers = self.build_headers(access_key).to_header_map(context)?;
        let url = self.url_for(path)?;
        let request = TransportRequest {
            method,
            url,
            headers,
            body,
        };

        let response =
            self.transport
                .send(request)
                .await
                .map_err(|source| RequestFailed::Transport {
                    context: context.to_string(),
                    source: Box::new(source),
                })?;

        if !response.status.is_success() {
            return Err(RequestFailed::HttpStatus {
                context: context.to_string(),
                status: response.status,
                body: response.text(),
            }
            .into());
        }
        Ok(response)
    }
}

fn json_body<B: Serialize + ?Sized>(
    method: &Method,
    path: &str,
    body: &B,
) -> Result<Value, RequestFailed> {
    serde_json::to_value(body).map_err(|source| RequestFailed::BodySerialization {
        context: format!("{method} {path}"),
        source,
    })
}

fn unwrap_body<R: DeserializeOwned>(
    context: &str,
    response: &TransportResponse,
) -> Result<R, RequestFailed> {
    let value = if response.body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&response.body).unwrap_or_else(|_| Value::String(response.text()))
    };
    serde_json::from_value(value).map_err(|source| RequestFailed::JsonDeserialization {
        context: context.to_string(),
        source,
    })
}
