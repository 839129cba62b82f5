//! Endpoint bindings.
//!
//! Each binding fixes a verb and a path template and delegates to the
//! [`RequestCore`]. Path parameters are interpolated as given, without escaping;
//! callers pass identifiers and currency codes, not arbitrary text. Responses are
//! returned as untyped JSON. No binding validates its arguments: the service
//! reports malformed ids or missing fields through its error responses.
//!
//! Every binding except [`Endpoints::ping`] takes an optional per-call access key
//! as its last argument, falling back to the configured default.

use serde::Serialize;
use serde_json::{Value, json};
use tokes_payments_types::{Allocation, WebhookUpdate};

use crate::error::PaymentsError;
use crate::request::RequestCore;
use crate::transport::{Transport, TransportResponse};

type ApiResult = Result<Value, PaymentsError>;

/// The payments API, one method per endpoint.
#[derive(Clone, Debug)]
pub struct Endpoints<T> {
    core: RequestCore<T>,
}

impl<T> Endpoints<T> {
    pub fn new(core: RequestCore<T>) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &RequestCore<T> {
        &self.core
    }
}

impl<T: Transport> Endpoints<T> {
    // Service

    /// `GET /`, liveness check with the default key.
    pub async fn ping(&self) -> ApiResult {
        self.core.get("/", None).await
    }

    /// `GET /api/test`, verifies an access key.
    pub async fn test_key(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/test", access_key).await
    }

    pub async fn create_merchant<B: Serialize + ?Sized>(
        &self,
        user: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/merchant", user, access_key).await
    }

    /// Issues a fresh access key, invalidating the one used for the call.
    pub async fn renew_key(&self, access_key: Option<&str>) -> ApiResult {
        self.core.post("/api/merchant/key", &json!({}), access_key).await
    }

    // Orders and payments

    pub async fn stage_order<B: Serialize + ?Sized>(
        &self,
        order: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/merchant/orders", order, access_key).await
    }

    pub async fn update_order<B: Serialize + ?Sized>(
        &self,
        id: &str,
        order: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.put(&format!("/api/merchant/orders/{id}"), order, access_key).await
    }

    pub async fn tokes_payment<B: Serialize + ?Sized>(
        &self,
        payment: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/merchant/payments", payment, access_key).await
    }

    pub async fn payment<B: Serialize + ?Sized>(
        &self,
        currency: &str,
        payment: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post(&format!("/api/merchant/payments/{currency}"), payment, access_key).await
    }

    pub async fn order_status(&self, id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/orders/{id}"), access_key).await
    }

    pub async fn order_reference(&self, reference_id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/refs/{reference_id}"), access_key).await
    }

    pub async fn payment_status(&self, id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/payments/{id}"), access_key).await
    }

    pub async fn payment_receipt(&self, id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/receipt/{id}"), access_key).await
    }

    /// USD market rate for `currency`.
    pub async fn market_usd_rate(&self, currency: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/markets/{currency}/rate"), access_key).await
    }

    pub async fn rate_order<B: Serialize + ?Sized>(
        &self,
        id: &str,
        rating: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.put(&format!("/api/merchant/rate/{id}"), rating, access_key).await
    }

    pub async fn order_history(
        &self,
        page: u32,
        sort: &str,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.get(&format!("/api/merchant/orders?page={page}&sort={sort}"), access_key).await
    }

    pub async fn sales_records(&self, days: u32, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/records?days={days}"), access_key).await
    }

    /// `GET /api/merchant/stats{query_string}`. See [`crate::derived::build_query_string`].
    pub async fn merchant_stats(&self, query_string: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/merchant/stats{query_string}"), access_key).await
    }

    // Withdrawal addresses

    pub async fn tokes_withdrawal_address(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/merchant/address", access_key).await
    }

    /// With `currency` of `None` the path ends in an empty segment and the
    /// service answers with every configured address.
    pub async fn withdrawal_address(
        &self,
        currency: Option<&str>,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.get(&address_path(currency), access_key).await
    }

    pub async fn update_withdrawal_address<B: Serialize + ?Sized>(
        &self,
        address: &B,
        currency: Option<&str>,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.put(&address_path(currency), address, access_key).await
    }

    pub async fn delete_withdrawal_address(
        &self,
        currency: &str,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.delete(&format!("/api/merchant/address/{currency}"), access_key).await
    }

    // Account

    pub async fn account_data(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/account", access_key).await
    }

    pub async fn account_lookup(
        &self,
        table: &str,
        id: &str,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.get(&format!("/api/account/{table}/{id}"), access_key).await
    }

    pub async fn account_update<B: Serialize + ?Sized>(
        &self,
        table: &str,
        id: &str,
        data: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.put(&format!("/api/account/{table}/{id}"), data, access_key).await
    }

    pub async fn account_create<B: Serialize + ?Sized>(
        &self,
        table: &str,
        data: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post(&format!("/api/account/{table}"), data, access_key).await
    }

    pub async fn update_webhooks(&self, webhook_url: &str, access_key: Option<&str>) -> ApiResult {
        let body = WebhookUpdate {
            webhook_url: webhook_url.to_string(),
        };
        self.core.put("/api/merchant/webhooks", &body, access_key).await
    }

    // Shopify

    pub async fn connect_shopify(&self, shop: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/shopify/{shop}"), access_key).await
    }

    pub async fn save_shopify_token<B: Serialize + ?Sized>(
        &self,
        token: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/shopify/token", token, access_key).await
    }

    // Allocations

    pub async fn toggle_allocations(&self, access_key: Option<&str>) -> ApiResult {
        self.core.put("/api/merchant/allocations", &json!({}), access_key).await
    }

    pub async fn update_allocation(
        &self,
        allocation: &Allocation,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/merchant/allocations", allocation, access_key).await
    }

    pub async fn delete_allocation(&self, id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.delete(&format!("/api/merchant/allocations/{id}"), access_key).await
    }

    // KYC

    pub async fn questionnaire_data(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/questionnaires", access_key).await
    }

    pub async fn kyc_status(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/kyc/status", access_key).await
    }

    pub async fn contacts(&self, access_key: Option<&str>) -> ApiResult {
        self.kyc_contacts_get(access_key).await
    }

    pub async fn update_contacts(&self, access_key: Option<&str>) -> ApiResult {
        self.core.put("/api/kyc/contacts", &json!({}), access_key).await
    }

    pub async fn create_account<B: Serialize + ?Sized>(
        &self,
        account: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.kyc_accounts_post(account, access_key).await
    }

    pub async fn kyc_contacts_get(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/kyc/contacts", access_key).await
    }

    pub async fn kyc_contacts_get_all(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/kyc/contacts/related", access_key).await
    }

    pub async fn kyc_contacts_get_one(&self, id: &str, access_key: Option<&str>) -> ApiResult {
        self.core.get(&format!("/api/kyc/contacts/{id}"), access_key).await
    }

    /// Returns the whole response, since a successful delete has no body to unwrap.
    pub async fn kyc_contacts_delete(
        &self,
        id: &str,
        access_key: Option<&str>,
    ) -> Result<TransportResponse, PaymentsError> {
        self.core.delete_raw(&format!("/api/kyc/contacts/{id}"), access_key).await
    }

    pub async fn kyc_contacts_post<B: Serialize + ?Sized>(
        &self,
        contact: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/kyc/contacts", contact, access_key).await
    }

    pub async fn kyc_contacts_patch<B: Serialize + ?Sized>(
        &self,
        id: &str,
        contact: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.patch(&format!("/api/kyc/contacts/{id}"), contact, access_key).await
    }

    pub async fn kyc_account_get(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/kyc/accounts", access_key).await
    }

    pub async fn kyc_questionnaire_get(&self, access_key: Option<&str>) -> ApiResult {
        self.core.get("/api/kyc/questionnaire", access_key).await
    }

    pub async fn kyc_accounts_post<B: Serialize + ?Sized>(
        &self,
        account: &B,
        access_key: Option<&str>,
    ) -> ApiResult {
        self.core.post("/api/kyc/accounts", account, access_key).await
    }
}

fn address_path(currency: Option<&str>) -> String {
    format!("/api/merchant/address/{}", currency.unwrap_or_default())
}
