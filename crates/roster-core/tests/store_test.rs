#![allow(clippy::unwrap_used)]
// Integration tests for `CollectionStore` against a wiremock collection.

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_api::EmployeeClient;
use roster_core::{CollectionStore, CoreError, Employee, EmployeeFields, EmployeeId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CollectionStore) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/employees", server.uri())).unwrap();
    let client = EmployeeClient::from_reqwest(reqwest::Client::new(), base_url).unwrap();
    (server, CollectionStore::with_client(client))
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn ann() -> serde_json::Value {
    json!({ "id": 1, "firstName": "Ann", "lastName": "Lee", "email": "a@x.com" })
}

fn bo() -> serde_json::Value {
    json!({ "id": 2, "firstName": "Bo", "lastName": "Kim", "email": "b@x.com" })
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_replaces_snapshot_in_server_order() {
    let (server, store) = setup().await;
    mount_list(&server, json!([bo(), ann()])).await;

    store.refresh().await.unwrap();

    let snap = store.snapshot();
    let names: Vec<_> = snap.iter().map(|e| e.fields.first_name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Ann"]);
    assert_eq!(store.len(), 2);
    assert!(store.last_refreshed().is_some());
    assert_eq!(
        store.get(&EmployeeId::from(1_u64)).unwrap().fields.email,
        "a@x.com"
    );
}

#[tokio::test]
async fn test_refresh_accepts_negative_and_fractional_ids() {
    let (server, store) = setup().await;
    mount_list(
        &server,
        json!([
            { "id": -3, "firstName": "Cy", "lastName": "Ng", "email": "c@x.com" },
            { "id": 1.5, "firstName": "Di", "lastName": "Wu", "email": "d@x.com" },
            ann()
        ]),
    )
    .await;

    store.refresh().await.unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(
        store.get(&EmployeeId::from("-3")).unwrap().fields.first_name,
        "Cy"
    );

    Mock::given(method("DELETE"))
        .and(path("/employees/-3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    store.delete(&EmployeeId::from("-3")).await.unwrap();
}

#[tokio::test]
async fn test_refresh_notifies_subscribers_once() {
    let (server, store) = setup().await;
    mount_list(&server, json!([ann()])).await;

    let mut sub = store.subscribe();
    assert!(sub.current().is_empty());

    store.refresh().await.unwrap();

    let snap = sub.changed().await.unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(sub.current().len(), 1);
    assert!(Arc::ptr_eq(&snap, &sub.latest()));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let (server, store) = setup().await;
    mount_list(&server, json!([ann()])).await;
    store.refresh().await.unwrap();
    let before = store.snapshot();
    let stamp = store.last_refreshed();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(503), .. }), "got: {err:?}");
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.last_refreshed(), stamp);
}

#[tokio::test]
async fn test_two_refreshes_without_mutation_match() {
    let (server, store) = setup().await;
    mount_list(&server, json!([ann(), bo()])).await;

    let first = store.refresh().await.unwrap();
    let second = store.refresh().await.unwrap();
    assert_eq!(*first, *second);
}

#[tokio::test]
async fn test_snapshot_stream_yields_each_refresh() {
    let (server, store) = setup().await;
    mount_list(&server, json!([ann()])).await;

    let mut stream = store.subscribe().into_stream();
    assert!(stream.next().await.unwrap().is_empty());

    store.refresh().await.unwrap();
    assert_eq!(stream.next().await.unwrap().len(), 1);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_leaves_snapshot_until_refresh() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_json(json!({
            "firstName": "Bo", "lastName": "Kim", "email": "b@x.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(bo()))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([bo()])).await;

    let created = store
        .create(&EmployeeFields::new("Bo", "Kim", "b@x.com"))
        .await
        .unwrap();
    assert_eq!(created.map(|e| e.id), Some(EmployeeId::from(2_u64)));
    assert!(store.is_empty());

    store.refresh().await.unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].fields, EmployeeFields::new("Bo", "Kim", "b@x.com"));
}

#[tokio::test]
async fn test_update_then_refresh_shows_new_fields() {
    let (server, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/employees/1"))
        .and(body_json(json!({
            "id": 1, "firstName": "Ann", "lastName": "Park", "email": "a@x.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(
        &server,
        json!([{ "id": 1, "firstName": "Ann", "lastName": "Park", "email": "a@x.com" }]),
    )
    .await;

    let updated = Employee::new(1, EmployeeFields::new("Ann", "Park", "a@x.com"));
    store.update(&updated).await.unwrap();
    store.refresh().await.unwrap();

    assert_eq!(*store.get(&EmployeeId::from(1_u64)).unwrap(), updated);
}

#[tokio::test]
async fn test_delete_then_refresh_drops_record() {
    let (server, store) = setup().await;
    mount_list(&server, json!([ann()])).await;
    store.refresh().await.unwrap();

    server.reset().await;
    Mock::given(method("DELETE"))
        .and(path("/employees/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([])).await;

    store.delete(&EmployeeId::from(1_u64)).await.unwrap();
    assert_eq!(store.len(), 1, "delete must not patch the snapshot");

    store.refresh().await.unwrap();
    assert!(store.get(&EmployeeId::from(1_u64)).is_none());
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (server, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/employees/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ghost = Employee::new(42, EmployeeFields::new("No", "One", "n@x.com"));
    let err = store.update(&ghost).await.unwrap_err();
    match err {
        CoreError::NotFound { identifier } => assert_eq!(identifier, "42"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_maps_to_connection_failed() {
    let base_url = Url::parse("http://127.0.0.1:9/employees").unwrap();
    let client = EmployeeClient::from_reqwest(reqwest::Client::new(), base_url).unwrap();
    let store = CollectionStore::with_client(client);

    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::ConnectionFailed { .. }), "got: {err:?}");
    assert!(err.is_transport());
}
