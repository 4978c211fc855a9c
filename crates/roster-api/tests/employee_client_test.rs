#![allow(clippy::unwrap_used)]
// Integration tests for `EmployeeClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_api::{EmployeeClient, EmployeePayload, Error, RecordId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EmployeeClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/employees", server.uri())).unwrap();
    let client = EmployeeClient::from_reqwest(reqwest::Client::new(), base_url).unwrap();
    (server, client)
}

fn payload<'a>(id: Option<&'a RecordId>) -> EmployeePayload<'a> {
    EmployeePayload {
        id,
        first_name: "Bo",
        last_name: "Kim",
        email: "b@x.com",
    }
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_preserves_server_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "firstName": "Bo", "lastName": "Kim", "email": "b@x.com" },
            { "id": "x1", "firstName": "Ann", "lastName": "Lee", "email": "a@x.com" }
        ])))
        .mount(&server)
        .await;

    let records = client.list().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId::Number(2_u64.into()));
    assert_eq!(records[0].first_name, "Bo");
    assert_eq!(records[1].id, RecordId::Text("x1".into()));
    assert_eq!(records[1].email, "a@x.com");
}

#[tokio::test]
async fn test_list_empty_collection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list().await.unwrap_err();
    match &err {
        Error::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
    assert!(err.is_transient());
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_sends_fields_without_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_json(json!({
            "firstName": "Bo", "lastName": "Kim", "email": "b@x.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "firstName": "Bo", "lastName": "Kim", "email": "b@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create(&payload(None)).await.unwrap();
    assert_eq!(created.map(|r| r.id), Some(RecordId::Number(9_u64.into())));
}

#[tokio::test]
async fn test_create_tolerates_empty_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client.create(&payload(None)).await.unwrap().is_none());
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_puts_full_record() {
    let (server, client) = setup().await;
    let id = RecordId::Number(3_u64.into());

    Mock::given(method("PUT"))
        .and(path("/employees/3"))
        .and(body_json(json!({
            "id": 3, "firstName": "Bo", "lastName": "Kim", "email": "b@x.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.update(&id, &payload(Some(&id))).await.unwrap();
}

#[tokio::test]
async fn test_update_missing_record() {
    let (server, client) = setup().await;
    let id = RecordId::Text("gone".into());

    Mock::given(method("PUT"))
        .and(path("/employees/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client.update(&id, &payload(Some(&id))).await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_record() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/employees/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete(&RecordId::Number(1_u64.into())).await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 9 of localhost in the test environment.
    let base_url = Url::parse("http://127.0.0.1:9/employees").unwrap();
    let client = EmployeeClient::from_reqwest(reqwest::Client::new(), base_url).unwrap();

    let err = client.delete(&RecordId::Number(1_u64.into())).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
