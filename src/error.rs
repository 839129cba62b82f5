//! Error types returned by the payments client.

use http::StatusCode;
use tokes_payments_types::ConfigError;

/// Any failure surfaced by [`crate::PaymentsClient`].
#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    /// The client configuration is unusable, or no access key could be resolved for a call.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The call was attempted and did not produce a usable response.
    #[error(transparent)]
    RequestFailed(#[from] RequestFailed),
}

impl PaymentsError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PaymentsError::RequestFailed(RequestFailed::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Failures of a single request. Every HTTP verb reports these identically.
///
/// `context` is the verb and path of the call, e.g. `"GET /api/merchant/orders/42"`.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailed {
    #[error("Invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid value for header {name}: {context}")]
    InvalidHeader {
        context: String,
        name: &'static str,
        #[source]
        source: http::header::InvalidHeaderValue,
    },
    #[error("Failed to serialize request body: {context}: {source}")]
    BodySerialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("HTTP error: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        context: String,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
