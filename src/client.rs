//! The [`PaymentsClient`] facade.
//!
//! A client is built once from a [`ClientConfig`] and then shared. It dereferences
//! to [`Endpoints`], so every endpoint binding is callable directly on it, and it
//! carries the derived operations as inherent methods.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tokes_payments::{ClientConfig, PaymentsClient};
//!
//! # async fn run() -> Result<(), tokes_payments::PaymentsError> {
//! let client = PaymentsClient::try_new(
//!     ClientConfig::new("https://payments.tokes.dev").with_api_key("merchant-key"),
//! )?;
//!
//! let status = client.order_status("order-42", None).await?;
//! let ready = client.has_valid_address(None).await?;
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::ops::Deref;
use tokes_payments_types::{ClientConfig, ConfigError, FilteredAddress, StatisticsQuery};

use crate::derived::DerivedOperations;
use crate::endpoints::Endpoints;
use crate::error::PaymentsError;
use crate::request::RequestCore;
use crate::transport::{ReqwestTransport, Transport};

/// Typed client for the merchant payments API.
///
/// Cloning is cheap and clones share the configuration and the transport.
#[derive(Clone, Debug)]
pub struct PaymentsClient<T = ReqwestTransport> {
    derived: DerivedOperations<Endpoints<T>>,
}

impl PaymentsClient<ReqwestTransport> {
    /// Builds a client over a default [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`ClientConfig::validate`].
    pub fn try_new(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T> PaymentsClient<T> {
    /// Builds a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let core = RequestCore::try_new(config, transport)?;
        let derived = DerivedOperations::new(Endpoints::new(core));
        Ok(Self { derived })
    }

    pub fn config(&self) -> &ClientConfig {
        self.endpoints().core().config()
    }

    pub fn endpoints(&self) -> &Endpoints<T> {
        self.derived.lookups()
    }
}

impl<T: Transport + Sync> PaymentsClient<T> {
    /// Merchant statistics. `None` asks for `type=dollarsPerOrder&currency=TKS`.
    pub async fn get_statistics(
        &self,
        query: Option<&StatisticsQuery>,
        access_key: Option<&str>,
    ) -> Result<Value, PaymentsError> {
        self.derived.get_statistics(query, access_key).await
    }

    /// Configured withdrawal addresses, skipping currencies without one.
    pub async fn get_filtered_addresses(
        &self,
        access_key: Option<&str>,
    ) -> Result<Vec<FilteredAddress>, PaymentsError> {
        self.derived.get_filtered_addresses(access_key).await
    }

    /// Whether at least one withdrawal address is configured.
    pub async fn has_valid_address(&self, access_key: Option<&str>) -> Result<bool, PaymentsError> {
        self.derived.has_valid_address(access_key).await
    }
}

impl<T> Deref for PaymentsClient<T> {
    type Target = Endpoints<T>;

    fn deref(&self) -> &Self::Target {
        self.endpoints()
    }
}

/// Builds a client for `host` without a default API key.
///
/// Every call then needs its own access key.
impl TryFrom<&str> for PaymentsClient {
    type Error = ConfigError;

    fn try_from(host: &str) -> Result<Self, Self::Error> {
        PaymentsClient::try_new(ClientConfig::new(host))
    }
}

impl TryFrom<String> for PaymentsClient {
    type Error = ConfigError;

    fn try_from(host: String) -> Result<Self, Self::Error> {
        PaymentsClient::try_new(ClientConfig::new(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use serde_json::json;
    use std::sync::Arc;

    const HOST: &str = "https://payments.test";
    const KEY: &str = "fa4325aa98748b4ff6cXXXXXXXX0f4b9a2bf7a5e3314c28";

    fn setup() -> (PaymentsClient<Arc<RecordingTransport>>, Arc<RecordingTransport>) {
        let transport = RecordingTransport::new();
        let config = ClientConfig::new(HOST).with_api_key(KEY);
        let client = PaymentsClient::with_transport(config, transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn test_construction_requires_host() {
        let err = PaymentsClient::try_new(ClientConfig::new("")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHost));
    }

    #[test]
    fn test_try_from_host() {
        let client: PaymentsClient = PaymentsClient::try_from(HOST).unwrap();
        assert_eq!(client.config().host, HOST);
        assert!(client.config().api_key.is_none());
    }

    #[tokio::test]
    async fn test_bindings_reachable_through_deref() {
        let (client, transport) = setup();

        client.test_key(None).await.unwrap();

        let request = transport.last();
        assert_eq!(request.url.as_str(), "https://payments.test/api/test");
        assert_eq!(request.headers.get("accesskey").unwrap(), KEY);
        assert_eq!(request.headers.get("appkey").unwrap(), "unsigned");
    }

    #[tokio::test]
    async fn test_statistics_request() {
        let (client, transport) = setup();
        let query = StatisticsQuery::new()
            .with("type", "dollarsPerOrder")
            .with("currency", "BTC");

        client.get_statistics(Some(&query), Some(KEY)).await.unwrap();

        assert_eq!(
            transport.last().url.as_str(),
            "https://payments.test/api/merchant/stats?type=dollarsPerOrder&currency=BTC&"
        );
    }

    #[tokio::test]
    async fn test_filtered_addresses_through_address_endpoint() {
        let (client, transport) = setup();
        transport.respond(200, r#"{"TKS": "3PGAv1cZXN93UHd4oZy24WQ9j8GGiVs8HJU", "BTC": ""}"#);

        let addresses = client.get_filtered_addresses(None).await.unwrap();

        assert_eq!(transport.last().url.path(), "/api/merchant/address/");
        assert_eq!(
            serde_json::to_value(&addresses).unwrap(),
            json!([{ "currency": "TKS", "address": "3PGAv1cZXN93UHd4oZy24WQ9j8GGiVs8HJU" }])
        );
    }

    #[tokio::test]
    async fn test_unset_currencies_do_not_fail_presence_check() {
        let (client, transport) = setup();
        transport.respond(
            200,
            r#"{"TKS": "3PGAv1cZXN93UHd4oZy24WQ9j8GGiVs8HJU", "BTC": false}"#,
        );
        transport.respond(200, r#"{"BTC": false, "ETH": 0}"#);

        assert!(client.has_valid_address(None).await.unwrap());
        assert!(!client.has_valid_address(None).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_addresses_configured() {
        let (client, transport) = setup();
        transport.respond(200, "null");

        assert!(!client.has_valid_address(None).await.unwrap());
    }
}
