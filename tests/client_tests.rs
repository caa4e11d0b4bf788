//! Contract tests for KsefClient against a local mock of the KSeF API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST | `/auth/challenge` | `challenge_*` |
//! | POST | `/auth/ksef-token` | `init_session_*`, `authorize_*` |
//! | POST | `/invoices/query/metadata` | `search_*` |
//!
//! Run with: `cargo test --features client --test client_tests`

#![cfg(feature = "client")]

use chrono::{TimeZone, Utc};
use ksef::client::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NIP: &str = "1111111111";

fn test_client(server: &MockServer) -> KsefClient {
    let config = KsefConfig::with_base_url(&server.uri()).unwrap().timeout_secs(5);
    KsefClient::new(config).unwrap()
}

fn challenge_body() -> serde_json::Value {
    json!({
        "timestamp": "2023-03-20T10:02:54.960Z",
        "challenge": "20230320-CR-3B5DCC20B3-C026645D90-3C"
    })
}

fn token_body() -> serde_json::Value {
    json!({
        "timestamp": "2023-03-20T10:02:56.000Z",
        "referenceNumber": "20230320-SE-3B5DCC20B3-C026645D90-3C",
        "sessionToken": {
            "token": "session-secret",
            "context": {
                "contextIdentifier": {"type": "onip", "identifier": NIP},
                "contextName": {"fullName": "Example Company 1 Sp z o. o."},
                "credentialsRoleList": []
            }
        }
    })
}

/// Prefixes the payload instead of encrypting it.
struct PlainEncryptor;

impl TokenEncryptor for PlainEncryptor {
    type Error = std::io::Error;

    fn encrypt(&self, payload: &[u8]) -> Result<String, Self::Error> {
        Ok(format!("enc:{}", String::from_utf8_lossy(payload)))
    }
}

struct BrokenEncryptor;

impl TokenEncryptor for BrokenEncryptor {
    type Error = std::io::Error;

    fn encrypt(&self, _payload: &[u8]) -> Result<String, Self::Error> {
        Err(std::io::Error::other("public key not loaded"))
    }
}

// ── POST /auth/challenge ─────────────────────────────────────────────

#[tokio::test]
async fn challenge_returns_timestamp_and_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/challenge"))
        .and(body_json(json!({
            "contextIdentifier": {"type": "onip", "identifier": NIP}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(challenge_body()))
        .expect(1)
        .mount(&server)
        .await;

    let challenge = test_client(&server).get_challenge(NIP).await.unwrap();
    assert_eq!(challenge.timestamp, "2023-03-20T10:02:54.960Z");
    assert_eq!(challenge.challenge, "20230320-CR-3B5DCC20B3-C026645D90-3C");
}

#[tokio::test]
async fn challenge_rate_limited_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/challenge"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = test_client(&server).get_challenge(NIP).await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimitExceeded { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn challenge_with_invalid_nip_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(challenge_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server).get_challenge("1234567890").await.unwrap_err();
    assert!(matches!(err, ApiError::Invalid(_)));
}

// ── POST /auth/ksef-token ────────────────────────────────────────────

#[tokio::test]
async fn init_session_posts_request_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/ksef-token"))
        .and(body_string_contains(
            "<Challenge>20230320-CR-3B5DCC20B3-C026645D90-3C</Challenge>",
        ))
        .and(body_string_contains("<ns2:Identifier>1111111111</ns2:Identifier>"))
        .and(body_string_contains("<Token>ZW5jcnlwdGVk</Token>"))
        .respond_with(ResponseTemplate::new(201).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let challenge: AuthorizationChallenge = serde_json::from_value(challenge_body()).unwrap();
    let token = test_client(&server)
        .init_session(&challenge, NIP, "ZW5jcnlwdGVk")
        .await
        .unwrap();

    assert_eq!(token.reference_number, "20230320-SE-3B5DCC20B3-C026645D90-3C");
    assert_eq!(token.credential().expose(), "session-secret");
    assert_eq!(
        token.session_token.context.context_name.full_name.as_deref(),
        Some("Example Company 1 Sp z o. o.")
    );
}

#[tokio::test]
async fn authorize_runs_full_handshake() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/challenge"))
        .respond_with(ResponseTemplate::new(201).set_body_json(challenge_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/ksef-token"))
        .and(body_string_contains("<Token>enc:api-token|1679306574960</Token>"))
        .respond_with(ResponseTemplate::new(201).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let token = test_client(&server)
        .authorize(NIP, "api-token", &PlainEncryptor)
        .await
        .unwrap();
    assert_eq!(token.credential().expose(), "session-secret");
}

#[tokio::test]
async fn authorize_surfaces_encryption_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/challenge"))
        .respond_with(ResponseTemplate::new(201).set_body_json(challenge_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/ksef-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(token_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .authorize(NIP, "api-token", &BrokenEncryptor)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Encryption(_)));
    assert!(err.to_string().contains("public key not loaded"));
}

#[tokio::test]
async fn init_session_rejected_is_unsupported_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/ksef-token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"exception\":\"bad token\"}"))
        .mount(&server)
        .await;

    let challenge: AuthorizationChallenge = serde_json::from_value(challenge_body()).unwrap();
    let err = test_client(&server)
        .init_session(&challenge, NIP, "x")
        .await
        .unwrap_err();
    match err {
        ApiError::UnsupportedResponse { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("bad token"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ── POST /invoices/query/metadata ────────────────────────────────────

fn query() -> InvoiceQuery {
    InvoiceQuery::new(
        Utc.with_ymd_and_hms(2023, 11, 14, 13, 21, 9).unwrap(),
        Utc.with_ymd_and_hms(2023, 12, 12, 13, 21, 9).unwrap(),
    )
}

#[tokio::test]
async fn search_sends_credential_paging_and_criteria() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/query/metadata"))
        .and(header("Authorization", "session-secret"))
        .and(query_param("PageSize", "100"))
        .and(query_param("PageOffset", "0"))
        .and(body_json(json!({
            "queryCriteria": {
                "subjectType": "subject1",
                "type": "range",
                "invoicingDateFrom": "2023-11-14T13:21:09.000Z",
                "invoicingDateTo": "2023-12-12T13:21:09.000Z"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timestamp": "2023-12-12T13:22:00.000Z",
            "referenceNumber": "20231212-SE-0000000000-0000000000-00",
            "numberOfElements": 0,
            "pageSize": 100,
            "pageOffset": 0,
            "invoiceHeaderList": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credential = SessionCredential::new("session-secret");
    let result = test_client(&server)
        .search_invoices(&credential, &query())
        .await
        .unwrap();
    assert_eq!(result["numberOfElements"], 0);
    assert!(result["invoiceHeaderList"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_pages_and_subject_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/query/metadata"))
        .and(query_param("PageSize", "10"))
        .and(query_param("PageOffset", "30"))
        .and(body_string_contains("\"subjectType\":\"subject2\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numberOfElements": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let query = query()
        .subject_type(SubjectType::Recipient)
        .page_size(10)
        .page_offset(30);
    test_client(&server)
        .search_invoices(&SessionCredential::new("t"), &query)
        .await
        .unwrap();
}

#[tokio::test]
async fn search_server_error_is_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/query/metadata"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_invoices(&SessionCredential::new("t"), &query())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_retryable());
    assert!(err.to_string().starts_with("Unsupported response status code: 500"));
}

#[tokio::test]
async fn search_rejects_non_object_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/query/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_invoices(&SessionCredential::new("t"), &query())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { .. }));
}

#[tokio::test]
async fn search_invalid_query_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_invoices(&SessionCredential::new("t"), &query().page_size(500))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Invalid(_)));
}
