use serde_json::{Value, json};
use std::time::Duration;
use tokes_payments::{
    ClientConfig, ConfigError, FilteredAddress, PaymentsClient, PaymentsError, ReqwestTransport,
    RequestFailed, StatisticsQuery,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "fa4325aa98748b4ff6cXXXXXXXX0f4b9a2bf7a5e3314c28";
const ALT_KEY: &str = "fa4325aa98748b4ff6cYYYYYYYY0f4b9a2bf7a5e3314c28";
const TKS_ADDRESS: &str = "3PGAv1cZXN93UHd4oZy24WQ9j8GGiVs8HJU";

fn client_for(server: &MockServer) -> PaymentsClient {
    PaymentsClient::try_new(ClientConfig::new(server.uri()).with_api_key(KEY)).unwrap()
}

#[tokio::test]
async fn test_requests_carry_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .and(header("accesskey", KEY))
        .and(header("appkey", "unsigned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).test_key(None).await.unwrap();

    assert_eq!(response, json!({ "valid": true }));
}

#[tokio::test]
async fn test_per_call_key_and_service_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/merchant/orders/42"))
        .and(header("accesskey", ALT_KEY))
        .and(header("appkey", "svc-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "paid" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PaymentsClient::try_new(
        ClientConfig::new(server.uri())
            .with_api_key(KEY)
            .with_service_key("svc-key"),
    )
    .unwrap();
    let response = client.order_status("42", Some(ALT_KEY)).await.unwrap();

    assert_eq!(response["status"], "paid");
}

#[tokio::test]
async fn test_statistics_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/merchant/stats"))
        .and(query_param("type", "dollarsPerOrder"))
        .and(query_param("currency", "BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": 12.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let query = StatisticsQuery::new()
        .with("type", "dollarsPerOrder")
        .with_optional("from", None::<String>)
        .with("currency", "BTC");
    client_for(&server)
        .get_statistics(Some(&query), Some(KEY))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), Some("type=dollarsPerOrder&currency=BTC&"));
}

#[tokio::test]
async fn test_filtered_addresses_and_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/merchant/address/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "TKS": TKS_ADDRESS, "BTC": "" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let addresses = client.get_filtered_addresses(None).await.unwrap();
    assert_eq!(
        addresses,
        vec![FilteredAddress {
            currency: "TKS".to_string(),
            address: TKS_ADDRESS.to_string(),
        }]
    );
    assert!(client.has_valid_address(None).await.unwrap());
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/merchant/address/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).has_valid_address(None).await.unwrap_err();

    match err {
        PaymentsError::RequestFailed(RequestFailed::HttpStatus { status, body, .. }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_patch_failure_is_wrapped_like_other_verbs() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/kyc/contacts/c-1"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .kyc_contacts_patch("c-1", &json!({ "email": "x" }), None)
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(422));
}

#[tokio::test]
async fn test_body_is_sent_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/merchant/webhooks"))
        .and(header("accesskey", KEY))
        .and(header("appkey", "svc-key"))
        .and(body_json(json!({ "webhook_url": "https://shop.test/hook" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PaymentsClient::try_new(
        ClientConfig::new(server.uri())
            .with_api_key(KEY)
            .with_service_key("svc-key"),
    )
    .unwrap();
    client
        .update_webhooks("https://shop.test/hook", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_repeated_get_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/markets/BTC/rate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "usd": 60000 })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.market_usd_rate("BTC", None).await.unwrap();
    let second = client.market_usd_rate("BTC", None).await.unwrap();
    assert_eq!(first, second);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url, received[1].url);
    assert_eq!(received[0].headers.get("accesskey"), received[1].headers.get("accesskey"));
}

#[tokio::test]
async fn test_liveness_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Tokes Payments API"))
        .mount(&server)
        .await;

    let response = client_for(&server).ping().await.unwrap();

    assert_eq!(response, Value::String("Tokes Payments API".to_string()));
}

#[tokio::test]
async fn test_delete_contact_returns_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/kyc/contacts/c-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .kyc_contacts_delete("c-2", None)
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 204);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client: PaymentsClient = PaymentsClient::try_from(server.uri()).unwrap();
    let err = client.account_data(None).await.unwrap_err();

    assert!(matches!(
        err,
        PaymentsError::Config(ConfigError::MissingAccessKey)
    ));
}

#[tokio::test]
async fn test_transport_timeout_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/kyc/status"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new().with_timeout(Duration::from_millis(50));
    let client =
        PaymentsClient::with_transport(ClientConfig::new(server.uri()).with_api_key(KEY), transport)
            .unwrap();
    let err = client.kyc_status(None).await.unwrap_err();

    assert!(matches!(
        err,
        PaymentsError::RequestFailed(RequestFailed::Transport { .. })
    ));
}
