//! Request bodies whose shape the client fixes itself.
//!
//! Most endpoints take caller-provided JSON; these two are assembled by the client.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/merchant/allocations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub currency: String,
    /// Share of incoming funds routed to `currency`, in percent.
    pub percentage: f64,
}

/// Body of `PUT /api/merchant/webhooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUpdate {
    pub webhook_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_body_uses_snake_case_key() {
        let body = WebhookUpdate {
            webhook_url: "https://shop.test/hooks".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "webhook_url": "https://shop.test/hooks" })
        );
    }

    #[test]
    fn test_allocation_body() {
        let body = Allocation {
            currency: "BTC".to_string(),
            percentage: 25.0,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "currency": "BTC", "percentage": 25.0 })
        );
    }
}
