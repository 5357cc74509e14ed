//! REST history source against a mock backend

use ewb_history::{
    ChangeHistory, EntityRef, HistoryConfig, HistoryError, HistorySource, ReferenceKind,
    RestHistorySource,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> HistoryConfig {
    HistoryConfig::new()
        .with_base_url(format!("{}/api", server.uri()))
        .with_timeout_secs(5)
}

fn change_set_json(pk: &str) -> serde_json::Value {
    json!({
        "pk": pk,
        "date": "2021-03-04T10:00:00Z",
        "user": {"pk": 1, "username": "admin"},
        "object_type": {"id": 3, "app_label": "shared_elements", "model": "task"},
        "object_uuid": "42",
        "changeset_type": "U",
        "change_records": [
            {"field_name": "state", "old_value": "NEW", "new_value": "DONE"}
        ]
    })
}

#[tokio::test]
async fn fetches_bare_array_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/42/history/"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            change_set_json("c2"),
            change_set_json("c1")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = RestHistorySource::new(config(&server)).unwrap();
    let history = source
        .fetch_history(&EntityRef::new("task", "42"))
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id.as_str(), "c2");
    assert_eq!(history[0].author(), "admin");
}

#[tokio::test]
async fn fetches_paginated_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadatafields/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"pk": "f1", "name": "Color", "base_type": "text"}]
        })))
        .mount(&server)
        .await;

    let source = RestHistorySource::new(config(&server)).unwrap();
    let fields = source.fetch_metadata_fields().await.unwrap();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "Color");
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dmps/7/history/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = RestHistorySource::new(config(&server)).unwrap();
    let err = source
        .fetch_history(&EntityRef::new("dmp", "7"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.is_network());
}

#[tokio::test]
async fn unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes/1/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "odd"})))
        .mount(&server)
        .await;

    let source = RestHistorySource::new(config(&server)).unwrap();
    let err = source
        .fetch_history(&EntityRef::new("note", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Decode { .. }));
    assert!(!err.is_network());
}

#[tokio::test]
async fn resolves_references() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pk": 4,
            "username": "jdoe",
            "userprofile": {"first_name": "Jane", "last_name": "Doe"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/labels/9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = RestHistorySource::new(config(&server)).unwrap();

    let user = source
        .resolve_reference(ReferenceKind::User, "4")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.display_name, "Jane Doe");

    let missing = source
        .resolve_reference(ReferenceKind::Label, "9")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadatafields/"))
        .and(header("authorization", "Token s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/42/history/"))
        .and(header("authorization", "Token s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([change_set_json("c1")])))
        .expect(1)
        .mount(&server)
        .await;

    let history = ChangeHistory::from_config(&config(&server).with_auth_token("s3cret")).unwrap();
    let changes = history
        .load_changes(&EntityRef::new("task", "42"))
        .await
        .unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].records[0].formatted_field_name, "state");
}
