//! Integration tests for the resource surface: URL scoping, sub-resource
//! bundles, query serialization, and the endpoints that bypass the
//! `{data: T}` envelope.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use finbridge::resources::{
    AccountListParams, AccountType, MerchantListParams, OpalCreateRequest, PaymentListParams,
    PaymentReversalUpdate, ReportCreateRequest, SimulatePaymentUpdate,
};
use finbridge::{Configuration, Finbridge};

fn client_for(server: &MockServer) -> Finbridge {
    let config = Configuration::builder()
        .base_url(server.uri())
        .api_key("sk_test_key")
        .build()
        .unwrap();
    Finbridge::new(&config)
}

#[tokio::test]
async fn test_account_list_serializes_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(query_param("holder_id", "ent_1"))
        .and(query_param("type", "liability"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let accounts = client
        .accounts
        .list(Some(AccountListParams {
            holder_id: Some("ent_1".to_string()),
            account_type: Some(AccountType::Liability),
            page: Some(2),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert!(accounts.is_empty());
}

#[tokio::test]
async fn test_account_withdraw_consent_posts_default_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc_1/consent"))
        .and(body_json(json!({
            "type": "withdraw",
            "reason": "holder_withdrew_consent"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "acc_1", "holder_id": "ent_1", "status": "disabled", "type": "ach",
                     "ach": {"routing": "062103000", "number": "123456789", "type": "checking"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let account = client.accounts.withdraw_consent("acc_1").await.unwrap();
    assert_eq!(account.status, "disabled");
}

#[tokio::test]
async fn test_account_sub_resources_scope_under_record_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc_1/balances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "bal_1", "account_id": "acc_1", "status": "pending"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc_1/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "txn_1", "account_id": "acc_1", "status": "posted", "amount": 1250}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let account = client.accounts.with_id("acc_1");

    let balance = account.balances.create().await.unwrap();
    assert_eq!(balance.id, "bal_1");

    let transactions = account.transactions.list().await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, Some(1250));
}

#[tokio::test]
async fn test_account_subscription_unenroll_issues_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/accounts/acc_1/subscriptions/sub_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "sub_1", "name": "transactions", "status": "inactive"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let subscription = client
        .accounts
        .with_id("acc_1")
        .subscriptions
        .delete("sub_1")
        .await
        .unwrap();
    assert_eq!(subscription.status, "inactive");
    // A bare unenroll carries no body and no idempotency key.
    let requests = server.received_requests().await.unwrap();
    let headers = format!("{:?}", requests[0].headers).to_lowercase();
    assert!(!headers.contains("idempotency-key"));
}

#[tokio::test]
async fn test_entity_verification_session_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entities/ent_1/verification_sessions"))
        .and(body_json(json!({"type": "sms"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "vrs_1", "entity_id": "ent_1", "type": "sms", "status": "pending"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/entities/ent_1/verification_sessions/vrs_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "vrs_1", "entity_id": "ent_1", "type": "sms", "status": "verified"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = client.entities.with_id("ent_1");

    let session = entity.verification_sessions.create("sms").await.unwrap();
    assert_eq!(session.status, "pending");

    let session = entity
        .verification_sessions
        .update("vrs_1", &json!({"sms": {"code": "123456"}}))
        .await
        .unwrap();
    assert_eq!(session.status, "verified");
}

#[tokio::test]
async fn test_payment_expand_joins_as_comma_separated_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("expand", "source,destination"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .payments
        .list(Some(PaymentListParams {
            expand: vec!["source".to_string(), "destination".to_string()],
            ..Default::default()
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_payment_reversal_update() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/payments/pmt_1/reversals/rvs_1"))
        .and(body_json(json!({"status": "pending"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "rvs_1", "pmt_id": "pmt_1", "status": "pending"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reversal = client
        .payments
        .with_id("pmt_1")
        .reversals
        .update(
            "rvs_1",
            &PaymentReversalUpdate {
                status: "pending".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(reversal.status, "pending");
}

#[tokio::test]
async fn test_payment_cancel_issues_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/payments/pmt_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "pmt_1", "amount": 5000, "source": "acc_src",
                     "destination": "acc_dst", "status": "canceled"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payment = client.payments.delete("pmt_1").await.unwrap();
    assert_eq!(
        payment.status,
        finbridge::resources::PaymentStatus::Canceled
    );
}

#[tokio::test]
async fn test_report_download_returns_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports"))
        .and(body_json(json!({"type": "payments.created.current"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "rpt_1", "type": "payments.created.current", "status": "processing"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/rpt_1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "id,amount\npmt_1,5000",
            "content_type": "text/csv"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .reports
        .create(
            &ReportCreateRequest {
                report_type: "payments.created.current".to_string(),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(report.id, "rpt_1");

    let download = client.reports.download("rpt_1").await.unwrap();
    // The download body is not envelope shaped and is returned whole.
    assert_eq!(download["content_type"], "text/csv");
    assert!(download["content"].as_str().unwrap().contains("pmt_1"));
}

#[tokio::test]
async fn test_merchant_search_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/merchants"))
        .and(query_param("name", "Example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"mch_id": "mch_1", "name": "Example Bank", "types": ["credit_card"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let merchants = client
        .merchants
        .list(Some(MerchantListParams {
            name: Some("Example".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(merchants[0].mch_id, "mch_1");
}

#[tokio::test]
async fn test_opal_session_create_and_retrieve() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/opal"))
        .and(body_json(json!({"entity_id": "ent_1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "opl_1", "entity_id": "ent_1", "status": "pending",
                     "url": "https://opal.finbridge.com/opl_1"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/opal/opl_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "opl_1", "entity_id": "ent_1", "status": "completed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client
        .opal
        .create(
            &OpalCreateRequest {
                entity_id: "ent_1".to_string(),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(session.id, "opl_1");
    assert_eq!(session.url.as_deref(), Some("https://opal.finbridge.com/opl_1"));

    let session = client.opal.retrieve("opl_1").await.unwrap();
    assert_eq!(session.status, "completed");
}

#[tokio::test]
async fn test_opal_session_list_scopes_to_collection_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/opal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "opl_1", "entity_id": "ent_1", "status": "pending"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sessions = client.opal.list().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].entity_id, "ent_1");
}

#[tokio::test]
async fn test_healthcheck_reads_unwrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": null,
            "message": "pong"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ping = client.healthcheck.retrieve().await.unwrap();
    assert!(ping.success);
    assert_eq!(ping.message, "pong");
}

#[tokio::test]
async fn test_simulate_payment_posts_under_simulate_namespace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simulate/payments/pmt_1"))
        .and(body_json(json!({"status": "processing"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "pmt_1", "amount": 5000, "source": "acc_src",
                     "destination": "acc_dst", "status": "processing"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payment = client
        .simulate
        .payments
        .update(
            "pmt_1",
            &SimulatePaymentUpdate {
                status: "processing".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        payment.status,
        finbridge::resources::PaymentStatus::Processing
    );
}

#[tokio::test]
async fn test_events_carry_record_snapshots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("type", "payment.update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "evt_1",
                "type": "payment.update",
                "resource_id": "pmt_1",
                "resource_type": "payment",
                "data": {"id": "pmt_1", "status": "sent"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let events = client
        .events
        .list(Some(finbridge::resources::ApiEventListParams {
            event_type: Some("payment.update".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(events[0].resource_id, "pmt_1");
    assert_eq!(events[0].data.as_ref().unwrap()["status"], "sent");
}

#[tokio::test]
async fn test_element_token_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/elements/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"element_token": "pk_elem_abc123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client
        .elements
        .create_token(&finbridge::resources::ElementTokenRequest {
            entity_id: "ent_1".to_string(),
            element_type: "link".to_string(),
            options: None,
        })
        .await
        .unwrap();
    assert_eq!(token.element_token, "pk_elem_abc123");
}
