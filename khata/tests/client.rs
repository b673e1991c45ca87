use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use khata::{
    Client, Config, CreateAccountGroupRequest, CreateAccountRequest, ErrorKind, ResponseStyle,
    UpdateAccountRequest,
};
use khata_core::hash::{base64_encode, hex_hmac_sha256};
use khata_core::{Context, EnvelopeSigner, FixedClock, FixedNonce, HttpSend, Result};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const SECRET: &str = "123456";
const TIMESTAMP: i64 = 1660582212000;
const NONCE: &str = "a1b2c3d4e5f60718";

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

impl RecordedRequest {
    fn body_json(&self) -> Map<String, Value> {
        serde_json::from_slice(&self.body).expect("request body must be a JSON object")
    }
}

/// Mock transport: hands out queued responses and records every request.
#[derive(Debug, Clone, Default)]
struct MockHttpSend {
    inner: Arc<MockInner>,
}

#[derive(Debug, Default)]
struct MockInner {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpSend {
    fn respond(&self, status: StatusCode, body: &str) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.inner.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        let (status, body) = self
            .inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no response queued for request");
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .expect("response must build"))
    }
}

fn client(mock: &MockHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config {
        base_url: Some("https://ledger.example.com/api".to_string()),
        client_key: Some("client_key".to_string()),
        secret_key: Some(SECRET.to_string()),
        namespace: Some("test-namespace".to_string()),
        ..Default::default()
    };

    Client::with_context(config, Context::new().with_http_send(mock.clone()))
        .expect("client must build")
        .with_signer(
            EnvelopeSigner::new()
                .with_clock(FixedClock(TIMESTAMP))
                .with_nonce_source(FixedNonce::new(NONCE)),
        )
}

const ACCOUNT_JSON: &str = r#"{
    "id": "acc-1",
    "code": "AC-1001",
    "name": "Cash",
    "type": "ASSET",
    "inactive": false
}"#;

#[tokio::test]
async fn test_list_empty_collection() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, r#"{"data":[]}"#);

    let accounts = client(&mock).accounts().list().await?;
    assert!(accounts.is_empty());

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].uri, "https://ledger.example.com/api/accounts");
    // Reads are unsigned: base headers only.
    assert_eq!(requests[0].headers.get("x-api-key").unwrap(), "client_key");
    assert_eq!(requests[0].headers.get("namespace").unwrap(), "test-namespace");
    assert!(requests[0].headers.get("x-nonce").is_none());
    assert!(requests[0].headers.get("x-timestamp").is_none());
    Ok(())
}

#[tokio::test]
async fn test_get_maps_404_to_api_error() {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::NOT_FOUND, r#"{"message":"not found"}"#);

    let err = client(&mock).accounts().get("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.message(), "not found");
}

#[tokio::test]
async fn test_update_with_empty_id_fails_locally() {
    let mock = MockHttpSend::default();

    let err = client(&mock)
        .accounts()
        .update("", &UpdateAccountRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    // Fail-fast: nothing went out on the wire.
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_update_forces_explicit_id_into_body() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, &format!(r#"{{"data":{ACCOUNT_JSON}}}"#));

    let payload = UpdateAccountRequest {
        id: "stale-id".to_string(),
        code: "AC-1001".to_string(),
        name: "Cash (renamed)".to_string(),
        ..Default::default()
    };
    client(&mock).accounts().update("acc-1", &payload).await?;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].uri, "https://ledger.example.com/api/accounts/acc-1");

    let body = requests[0].body_json();
    assert_eq!(body["id"], Value::from("acc-1"));
    assert_eq!(body["name"], Value::from("Cash (renamed)"));
    Ok(())
}

#[tokio::test]
async fn test_create_sends_signed_envelope() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, &format!(r#"{{"data":{ACCOUNT_JSON}}}"#));

    let payload = CreateAccountRequest {
        code: "AC-1001".to_string(),
        name: "Cash".to_string(),
        ..Default::default()
    };
    let created = client(&mock).accounts().create(&payload).await?;
    assert_eq!(created.id, "acc-1");

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].uri, "https://ledger.example.com/api/accounts");

    let mut body = requests[0].body_json();
    assert_eq!(body["code"], Value::from("AC-1001"));
    assert_eq!(body["timestamp"], Value::from(TIMESTAMP));
    assert_eq!(body["nonce"], Value::from(NONCE));

    // Headers carry the exact values folded into the signature.
    let headers = &requests[0].headers;
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert_eq!(headers.get("x-nonce").unwrap(), NONCE);
    assert_eq!(
        headers.get("x-timestamp").unwrap(),
        &TIMESTAMP.to_string()
    );

    // The signature verifies against the body minus the signature field.
    let signature = body
        .remove("signature")
        .and_then(|v| v.as_str().map(str::to_string))
        .expect("body must carry a signature");
    let encoded = base64_encode(&serde_json::to_vec(&body).unwrap());
    assert_eq!(
        signature,
        hex_hmac_sha256(SECRET.as_bytes(), encoded.as_bytes())
    );
    Ok(())
}

#[tokio::test]
async fn test_get_by_code_miss_is_local_not_found() {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, &format!(r#"{{"data":[{ACCOUNT_JSON}]}}"#));

    let err = client(&mock)
        .accounts()
        .get_by_code("NO-SUCH-CODE")
        .await
        .unwrap_err();

    // A local miss, not a remote failure: NotFound kind, no HTTP status.
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), None);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_get_by_code_scans_listing() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, &format!(r#"{{"data":[{ACCOUNT_JSON}]}}"#));

    let account = client(&mock).accounts().get_by_code("AC-1001").await?;
    assert_eq!(account.id, "acc-1");
    Ok(())
}

#[tokio::test]
async fn test_activate_patches_then_reads_back() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, "{}");
    mock.respond(StatusCode::OK, &format!(r#"{{"data":{ACCOUNT_JSON}}}"#));

    let account = client(&mock).accounts().activate("acc-1").await?;
    assert!(!account.inactive);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(
        requests[0].uri,
        "https://ledger.example.com/api/accounts/acc-1/active"
    );
    // Even a bodyless transition is signed.
    let body = requests[0].body_json();
    assert_eq!(body.len(), 3);
    assert!(body.contains_key("signature"));

    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(
        requests[1].uri,
        "https://ledger.example.com/api/accounts/acc-1"
    );
    Ok(())
}

#[tokio::test]
async fn test_deactivate_uses_inactive_subresource() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, "{}");
    mock.respond(
        StatusCode::OK,
        r#"{"data":{"id":"acc-1","code":"AC-1001","name":"Cash","inactive":true}}"#,
    );

    let account = client(&mock).accounts().deactivate("acc-1").await?;
    assert!(account.inactive);

    let requests = mock.requests();
    assert_eq!(
        requests[0].uri,
        "https://ledger.example.com/api/accounts/acc-1/inactive"
    );
    Ok(())
}

#[tokio::test]
async fn test_bare_response_style() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, &format!("[{ACCOUNT_JSON}]"));

    let accounts = client(&mock)
        .with_response_style(ResponseStyle::Bare)
        .accounts()
        .list()
        .await?;
    assert_eq!(accounts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_account_group_natural_key_is_name() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        StatusCode::OK,
        r#"{"data":[{"id":"grp-1","name":"Current Assets"}]}"#,
    );

    let group = client(&mock)
        .account_groups()
        .get_by_name("Current Assets")
        .await?;
    assert_eq!(group.id, "grp-1");

    assert_eq!(
        mock.requests()[0].uri,
        "https://ledger.example.com/api/account-groups"
    );
    Ok(())
}

#[tokio::test]
async fn test_account_group_create_is_signed() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(
        StatusCode::OK,
        r#"{"data":{"id":"grp-1","name":"Current Assets"}}"#,
    );

    let payload = CreateAccountGroupRequest {
        name: "Current Assets".to_string(),
        ..Default::default()
    };
    let group = client(&mock).account_groups().create(&payload).await?;
    assert_eq!(group.id, "grp-1");

    let body = mock.requests()[0].body_json();
    assert_eq!(body["name"], Value::from("Current Assets"));
    assert!(body.contains_key("signature"));
    Ok(())
}

#[tokio::test]
async fn test_journal_voucher_collection_path() -> Result<()> {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::OK, r#"{"data":[]}"#);

    let vouchers = client(&mock).journal_vouchers().list().await?;
    assert!(vouchers.is_empty());

    assert_eq!(
        mock.requests()[0].uri,
        "https://ledger.example.com/api/journal-vouchers"
    );
    Ok(())
}

#[tokio::test]
async fn test_error_body_without_message_yields_empty_message() {
    let mock = MockHttpSend::default();
    mock.respond(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

    let err = client(&mock).accounts().list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.message(), "");
}
