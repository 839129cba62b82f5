#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Typed client for the Tokes merchant payments HTTP API.
//!
//! The crate turns the service's REST endpoints (orders, payments, withdrawal
//! addresses, KYC contacts and accounts, merchant statistics, allocations) into
//! async methods on a [`PaymentsClient`].
//!
//! # Layers
//!
//! - [`request`] - The request core: access key resolution, `accesskey`/`appkey`
//!   headers, URL composition, response unwrapping, error mapping
//! - [`endpoints`] - One binding per endpoint: a verb and a path template
//! - [`derived`] - Operations that shape responses: statistics query strings,
//!   filtered withdrawal addresses, address presence
//! - [`transport`] - The HTTP seam, with a `reqwest` implementation
//!
//! # Access keys
//!
//! Each call takes an optional access key. When it is `None` the configured API
//! key is used; when neither exists the call fails with
//! [`ConfigError::MissingAccessKey`] before anything is sent.
//!
//! # Errors
//!
//! Construction fails with [`ConfigError`]. Calls fail with
//! [`PaymentsError::RequestFailed`] for any transport failure or non-2xx status,
//! identically for every verb. Nothing is retried.
//!
//! # Feature Flags
//!
//! - `telemetry` - Wraps every request in a `tracing` span and records its outcome

mod client;
pub mod derived;
pub mod endpoints;
mod error;
pub mod request;
mod telemetry;
pub mod transport;

pub use client::PaymentsClient;
pub use derived::{DerivedOperations, MerchantLookups, build_query_string};
pub use endpoints::Endpoints;
pub use error::{PaymentsError, RequestFailed};
pub use request::{RequestCore, RequestHeaders};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

pub use tokes_payments_types::{
    AddressMap, Allocation, ClientConfig, ConfigError, FilteredAddress, StatisticsQuery,
    WebhookUpdate,
};
