//! Mock server tests for the obdash session client.
//!
//! These tests use wiremock to simulate the diagnostics service and test
//! the client's behavior without requiring network access or real
//! credentials.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use obdash_core::store::{Credential, CredentialStore, MemoryStore};
use obdash_core::{AccessToken, ApiUrl, Credentials, RefreshToken, Session};
use obdash_http::{DashboardApi, RestSession};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    // For tests, we need to allow HTTP localhost
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Build a JWT-shaped token whose payload segment is `payload`.
fn token_with_payload(payload: &str) -> String {
    format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
}

/// A store pre-loaded with one credential.
fn seeded_store(access: &str) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.save(&Credential::new(
        AccessToken::new(access),
        RefreshToken::new("refresh"),
        "admin",
    ));
    store
}

/// Matches requests that carry no authorization header.
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// Matches requests whose URL has no `token` query parameter.
struct NoTokenQueryParam;

impl Match for NoTokenQueryParam {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "token")
    }
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn login_success_decodes_role_claim() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({
            "username": "tech.alice",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": access,
            "refresh": "refresh-token"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let api = DashboardApi::new(mock_api_url(&server));
    let session = api
        .login(Credentials::new("tech.alice", "secret123"), store.clone())
        .await
        .unwrap();

    assert_eq!(session.role().as_deref(), Some("admin"));

    let stored = store.load().unwrap();
    assert_eq!(stored.access().as_str(), access);
    assert_eq!(stored.refresh().as_str(), "refresh-token");
    assert_eq!(stored.role(), "admin");
}

#[tokio::test]
async fn login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let api = DashboardApi::new(mock_api_url(&server));
    let result = api
        .login(Credentials::new("bad.user", "wrongpass"), store.clone())
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("invalid credentials"));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn login_without_role_claim_defaults_to_guest() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": token_with_payload("{}"),
            "refresh": "r"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let api = DashboardApi::new(mock_api_url(&server));
    let session = api
        .login(Credentials::new("tech.alice", "secret"), store.clone())
        .await
        .unwrap();

    assert_eq!(session.role().as_deref(), Some("guest"));
    assert_eq!(store.load().unwrap().role(), "guest");
}

#[tokio::test]
async fn login_with_malformed_token_stores_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "not-a-jwt",
            "refresh": "r"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let api = DashboardApi::new(mock_api_url(&server));
    let result = api
        .login(Credentials::new("tech.alice", "secret"), store.clone())
        .await;

    assert!(result.is_err());
    // A decode failure must not leave a partial credential behind
    assert!(store.load().is_none());
}

// ============================================================================
// Bearer Attachment Tests
// ============================================================================

#[tokio::test]
async fn requests_carry_stored_token_verbatim() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/metadata/"))
        .and(header("authorization", format!("Bearer {}", access)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = RestSession::from_store(mock_api_url(&server), seeded_store(&access));
    session.vehicle_metadata().await.unwrap();
}

#[tokio::test]
async fn requests_without_credential_send_no_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = RestSession::from_store(mock_api_url(&server), store);
    session.vehicle_metadata().await.unwrap();
}

#[tokio::test]
async fn metadata_payload_passes_through_unmodified() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"technician"}"#);

    Mock::given(method("GET"))
        .and(path("/api/metadata/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "make": "Toyota", "model": "Corolla", "year": 2020, "vin": "JTDBU4EE9A9123456"},
            {"id": 2, "make": "Honda", "model": "Civic", "year": 2019}
        ])))
        .mount(&server)
        .await;

    let session = RestSession::from_store(mock_api_url(&server), seeded_store(&access));
    let vehicles = session.vehicle_metadata().await.unwrap();

    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].make, "Toyota");
    assert_eq!(vehicles[0].vin.as_deref(), Some("JTDBU4EE9A9123456"));
    assert_eq!(vehicles[1].year, 2019);
    assert!(vehicles[1].vin.is_none());
}

#[tokio::test]
async fn user_listing_carries_server_side_roles() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .and(header("authorization", format!("Bearer {}", access)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "tech.alice", "email": "alice@example.com", "role": "admin"},
            {"id": 2, "username": "tech.bob"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let session = RestSession::from_store(mock_api_url(&server), seeded_store(&access));
    let users = session.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].role.as_deref(), Some("admin"));
    assert!(users[1].email.is_none());
}

#[tokio::test]
async fn fusebox_lookup_sends_required_query_params() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/fusebox/"))
        .and(query_param("make", "Toyota"))
        .and(query_param("model", "Corolla"))
        .and(query_param("year", "2020"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"make": "Toyota", "model": "Corolla", "year": 2020,
             "location": "Under dash, driver side", "notes": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let session = RestSession::from_store(mock_api_url(&server), seeded_store(&access));
    let boxes = session.fusebox_lookup("Toyota", "Corolla", 2020).await.unwrap();

    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].location, "Under dash, driver side");
}

// ============================================================================
// Unauthorized Recovery Tests
// ============================================================================

#[tokio::test]
async fn unauthorized_response_clears_store_and_signals_expiry() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/obd/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .mount(&server)
        .await;

    let store = seeded_store(&access);
    let session = RestSession::from_store(mock_api_url(&server), store.clone());
    let expired = session.subscribe_expired();
    assert!(!*expired.borrow());

    let err = session.obd_diagnostics().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(store.load().is_none());
    assert!(*expired.borrow());
    assert!(session.role().is_none());
}

#[tokio::test]
async fn other_failures_leave_store_untouched() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/sensor-chart/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "internal error"
        })))
        .mount(&server)
        .await;

    let store = seeded_store(&access);
    let session = RestSession::from_store(mock_api_url(&server), store.clone());
    let expired = session.subscribe_expired();

    let err = session.sensor_chart().await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert!(store.load().is_some());
    assert!(!*expired.borrow());
}

#[tokio::test]
async fn concurrent_unauthorized_responses_recover_idempotently() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .mount(&server)
        .await;

    let store = seeded_store(&access);
    let session = RestSession::from_store(mock_api_url(&server), store.clone());

    let (a, b) = tokio::join!(session.vehicle_metadata(), session.obd_diagnostics());

    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    // Double deletion is a no-op; end state is simply "credential absent"
    assert!(store.load().is_none());
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn exports_authenticate_with_header_not_query_token() {
    let server = MockServer::start().await;
    let access = token_with_payload(r#"{"role":"admin"}"#);

    Mock::given(method("GET"))
        .and(path("/api/export/csv/"))
        .and(header("authorization", format!("Bearer {}", access)))
        .and(NoTokenQueryParam)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("Timestamp,Sensor,Value\n", "text/csv"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = RestSession::from_store(mock_api_url(&server), seeded_store(&access));
    let bytes = session.export_csv().await.unwrap();
    assert_eq!(bytes, b"Timestamp,Sensor,Value\n");
}
