//! Integration tests for the HTTP record store against a mock endpoint.
//!
//! These verify the request shapes sent to the store and how list and
//! mutation responses are interpreted.

use promptbank_client::{ClientConfig, Error, HttpRecordStore, Prompt, PromptFields, RecordStore};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, strict: bool) -> ClientConfig {
    ClientConfig {
        api_url: Some(format!("{}/exec", server.uri())),
        strict_mutations: strict,
        mock_delay_ms: 0,
        request_timeout_secs: Some(5),
    }
}

fn sample() -> Prompt {
    Prompt {
        id: "row-3".to_string(),
        title: "Python Bug Fixer".to_string(),
        category: "Coding".to_string(),
        body: "Analyze the following Python code".to_string(),
        created_at: "2024-05-01T10:00:00.000Z".to_string(),
    }
}

#[tokio::test]
async fn test_list_all_returns_envelope_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {
                    "id": 1,
                    "title": "SEO Article Writer",
                    "category": "Writing",
                    "prompts": "You are an expert SEO copywriter.",
                    "created_at": "2024-05-02T10:00:00.000Z"
                },
                {
                    "id": "row-3",
                    "title": "Python Bug Fixer",
                    "category": "Coding",
                    "body": "Analyze the following Python code",
                    "createdAt": "2024-05-01T10:00:00.000Z"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    let prompts = store.list_all().await.expect("list should succeed");

    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].id, "1");
    assert_eq!(prompts[0].body, "You are an expert SEO copywriter.");
    assert_eq!(prompts[1], sample());
}

#[tokio::test]
async fn test_list_all_error_envelope_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "message": "Sheet 'Prompts' missing"})),
        )
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    match store.list_all().await {
        Err(Error::Remote(msg)) => assert_eq!(msg, "Sheet 'Prompts' missing"),
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_all_error_envelope_without_message_uses_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    match store.list_all().await {
        Err(Error::Remote(msg)) => assert_eq!(msg, "Failed to fetch"),
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_all_success_without_data_is_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    assert!(matches!(store.list_all().await, Err(Error::Remote(_))));
}

#[tokio::test]
async fn test_list_all_unparseable_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    assert!(matches!(store.list_all().await, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_list_all_http_failure_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    match store.list_all().await {
        Err(Error::Transport(msg)) => assert!(msg.contains("500"), "got {}", msg),
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_all_http_failure_keeps_envelope_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({"status": "error", "message": "Quota exceeded"})),
        )
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    match store.list_all().await {
        Err(Error::Remote(msg)) => assert_eq!(msg, "Quota exceeded"),
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_posts_action_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_json(json!({
            "action": "create",
            "title": "Haiku",
            "category": "Writing",
            "body": "Write a haiku"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success", "id": "9"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    store
        .create(PromptFields {
            title: "Haiku".to_string(),
            category: "Writing".to_string(),
            body: "Write a haiku".to_string(),
        })
        .await
        .expect("create should succeed");
}

#[tokio::test]
async fn test_update_round_trips_identity_and_timestamp() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "update",
            "id": "row-3",
            "title": "Python Bug Fixer",
            "category": "Coding",
            "body": "Analyze the following Python code",
            "createdAt": "2024-05-01T10:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    store.update(sample()).await.expect("update should succeed");
}

#[tokio::test]
async fn test_delete_error_envelope_fails_in_strict_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({"action": "delete", "id": "missing"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "message": "ID not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, true)).expect("store");
    match store.delete("missing").await {
        Err(Error::Remote(msg)) => assert_eq!(msg, "ID not found"),
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_error_envelope_ignored_in_lenient_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "message": "ID not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server, false)).expect("store");
    assert!(store.delete("missing").await.is_ok());
}

#[tokio::test]
async fn test_mutation_http_failure_is_transport_error_in_both_modes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    for strict in [true, false] {
        let store = HttpRecordStore::new(&config_for(&server, strict)).expect("store");
        assert!(matches!(store.delete("1").await, Err(Error::Transport(_))));
    }
}
