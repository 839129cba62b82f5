#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Tokes merchant payments API.
//!
//! This crate holds the data model shared by the `tokes-payments` client and the
//! command line tool. It has no networking of its own.
//!
//! # Modules
//!
//! - [`config`] - Client configuration, validation, and environment variable resolution
//! - [`address`] - Withdrawal address maps as returned by the service, and their filtered form
//! - [`stats`] - Ordered statistics query parameters
//! - [`models`] - Request bodies with a fixed shape (allocations, webhooks)

pub mod address;
pub mod config;
pub mod models;
pub mod stats;

pub use address::{AddressMap, FilteredAddress};
pub use config::{ClientConfig, ConfigError, DEFAULT_SERVICE_KEY, LiteralOrEnv};
pub use models::{Allocation, WebhookUpdate};
pub use stats::StatisticsQuery;
