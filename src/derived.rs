//! Operations that post-process endpoint responses.
//!
//! [`DerivedOperations`] is built on top of a [`MerchantLookups`] implementation,
//! normally [`Endpoints`], handed over at construction. Tests substitute their own
//! lookups to exercise the shaping logic without a server.
//!
//! Empty remote data is not an error here: a merchant without configured
//! addresses gets an empty list and `false`. Transport failures still propagate.

use serde_json::Value;
use tokes_payments_types::{AddressMap, FilteredAddress, StatisticsQuery};
use url::form_urlencoded;

use crate::endpoints::Endpoints;
use crate::error::PaymentsError;
use crate::transport::Transport;

/// The two endpoint lookups derived operations depend on.
pub trait MerchantLookups {
    /// Every configured withdrawal address (the no-currency form of the address endpoint).
    fn withdrawal_addresses(
        &self,
        access_key: Option<&str>,
    ) -> impl Future<Output = Result<AddressMap, PaymentsError>> + Send;

    /// Merchant statistics for an already built query string.
    fn statistics(
        &self,
        query_string: &str,
        access_key: Option<&str>,
    ) -> impl Future<Output = Result<Value, PaymentsError>> + Send;
}

impl<T: Transport + Sync> MerchantLookups for Endpoints<T> {
    async fn withdrawal_addresses(
        &self,
        access_key: Option<&str>,
    ) -> Result<AddressMap, PaymentsError> {
        self.core().get("/api/merchant/address/", access_key).await
    }

    async fn statistics(
        &self,
        query_string: &str,
        access_key: Option<&str>,
    ) -> Result<Value, PaymentsError> {
        self.merchant_stats(query_string, access_key).await
    }
}

/// Builds `?name=value&...&` from the entries that carry a value, in order.
///
/// Names and values are form-url-encoded, so plain codes like `BTC` pass through
/// unchanged. The trailing `&` is kept; the service accepts it.
///
/// ```
/// use tokes_payments::derived::build_query_string;
/// use tokes_payments_types::StatisticsQuery;
///
/// let query = StatisticsQuery::new()
///     .with("type", "dollarsPerOrder")
///     .with("currency", "BTC");
/// assert_eq!(build_query_string(&query), "?type=dollarsPerOrder&currency=BTC&");
/// ```
pub fn build_query_string(query: &StatisticsQuery) -> String {
    query
        .present()
        .fold(String::from("?"), |mut out, (name, value)| {
            out.extend(form_urlencoded::byte_serialize(name.as_bytes()));
            out.push('=');
            out.extend(form_urlencoded::byte_serialize(value.as_bytes()));
            out.push('&');
            out
        })
}

/// Response-shaping operations over a set of [`MerchantLookups`].
#[derive(Clone, Debug)]
pub struct DerivedOperations<L> {
    lookups: L,
}

impl<L> DerivedOperations<L> {
    pub fn new(lookups: L) -> Self {
        Self { lookups }
    }

    pub fn lookups(&self) -> &L {
        &self.lookups
    }
}

impl<L: MerchantLookups> DerivedOperations<L> {
    /// Merchant statistics. `None` asks for [`StatisticsQuery::default`].
    pub async fn get_statistics(
        &self,
        query: Option<&StatisticsQuery>,
        access_key: Option<&str>,
    ) -> Result<Value, PaymentsError> {
        let query_string = match query {
            Some(query) => build_query_string(query),
            None => build_query_string(&StatisticsQuery::default()),
        };
        self.lookups.statistics(&query_string, access_key).await
    }

    /// Configured withdrawal addresses, skipping currencies without one.
    pub async fn get_filtered_addresses(
        &self,
        access_key: Option<&str>,
    ) -> Result<Vec<FilteredAddress>, PaymentsError> {
        let addresses = self.lookups.withdrawal_addresses(access_key).await?;
        Ok(addresses.filtered())
    }

    /// Whether at least one withdrawal address is configured.
    pub async fn has_valid_address(&self, access_key: Option<&str>) -> Result<bool, PaymentsError> {
        let addresses = self.get_filtered_addresses(access_key).await?;
        Ok(!addresses.is_empty())
    }
}
