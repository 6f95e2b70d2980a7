//! End-to-end tests for the decode-validate-dispatch-respond pipeline

use serde_json::json;

use keygate::gateway::{self, Outcome, respond};
use keygate::http::response::StatusCode;
use keygate::store::MemoryStore;

async fn roundtrip(store: &MemoryStore, body: &str) -> Outcome {
    gateway::execute(store, body.as_bytes()).await
}

#[tokio::test]
async fn test_set_then_get_round_trip() {
    let store = MemoryStore::new();

    let set = roundtrip(&store, r#"{"action":"set","key":"k","value":"v"}"#).await;
    assert_eq!(
        set,
        Outcome::Success {
            key: "k".to_string(),
            value: None,
        }
    );

    let response = respond::into_response(roundtrip(&store, r#"{"action":"get","key":"k"}"#).await);
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(
        response.headers.get("Content-Type").unwrap(),
        "application/json"
    );

    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({"key": "k", "value": "v"}));
}

#[tokio::test]
async fn test_set_response_omits_value() {
    let store = MemoryStore::new();

    let response =
        respond::into_response(roundtrip(&store, r#"{"action":"set","key":"k","value":"v"}"#).await);
    assert_eq!(response.status, StatusCode::Ok);

    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({"key": "k"}));
}

#[tokio::test]
async fn test_get_absent_key_responds_with_null() {
    let store = MemoryStore::new();

    let response =
        respond::into_response(roundtrip(&store, r#"{"action":"get","key":"missing"}"#).await);
    assert_eq!(response.status, StatusCode::Ok);

    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({"key": "missing", "value": null}));
}

#[tokio::test]
async fn test_repeated_set_yields_same_get_result() {
    let store = MemoryStore::new();

    for _ in 0..3 {
        roundtrip(&store, r#"{"action":"set","key":"k","value":"v"}"#).await;
    }

    let outcome = roundtrip(&store, r#"{"action":"get","key":"k"}"#).await;
    assert_eq!(
        outcome,
        Outcome::Success {
            key: "k".to_string(),
            value: Some(serde_json::Value::String("v".to_string())),
        }
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let store = MemoryStore::new();

    let outcome = roundtrip(&store, "{not json").await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "malformed command body".to_string(),
        }
    );
}

#[tokio::test]
async fn test_empty_body_is_malformed() {
    let store = MemoryStore::new();

    let outcome = roundtrip(&store, "").await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "malformed command body".to_string(),
        }
    );
}

#[tokio::test]
async fn test_non_object_body_is_malformed() {
    let store = MemoryStore::new();

    // Arrays would otherwise map onto the command fields positionally
    for body in [r#"["get","k"]"#, r#""get""#, "42", "null"] {
        let outcome = roundtrip(&store, body).await;
        assert_eq!(
            outcome,
            Outcome::Failure {
                message: "malformed command body".to_string(),
            }
        );
    }
}

#[tokio::test]
async fn test_missing_action_response_body_is_exact() {
    let store = MemoryStore::new();

    let response = respond::into_response(roundtrip(&store, r#"{"key":"k"}"#).await);
    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, b"`action` is not set.\n".to_vec());
}

#[tokio::test]
async fn test_set_without_value_response_body_is_exact() {
    let store = MemoryStore::new();

    let response = respond::into_response(roundtrip(&store, r#"{"action":"set","key":"k"}"#).await);
    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(
        response.body,
        b"`value` is not set. `value` must be set and must be not empty while using `\"action\": \"set\"`.\n"
            .to_vec()
    );
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_store() {
    let store = MemoryStore::new();

    roundtrip(&store, r#"{"action":"set","key":"k"}"#).await;

    let outcome = roundtrip(&store, r#"{"action":"get","key":"k"}"#).await;
    assert_eq!(
        outcome,
        Outcome::Success {
            key: "k".to_string(),
            value: Some(serde_json::Value::Null),
        }
    );
}

#[test]
fn test_failure_response_has_no_content_type() {
    let response = respond::into_response(Outcome::Failure {
        message: "`action` is not set.\n".to_string(),
    });

    assert_eq!(response.status, StatusCode::BadRequest);
    assert!(!response.headers.contains_key("Content-Type"));
}

#[test]
fn test_failure_response_is_newline_terminated() {
    // Store errors carry no trailing newline of their own
    let response = respond::into_response(Outcome::Failure {
        message: "store protocol error: connection closed mid-reply".to_string(),
    });

    assert_eq!(
        response.body,
        b"store protocol error: connection closed mid-reply\n".to_vec()
    );
}

#[test]
fn test_failure_response_does_not_double_terminate() {
    let response = respond::into_response(Outcome::Failure {
        message: "`key` is not set.\n".to_string(),
    });

    assert_eq!(response.body, b"`key` is not set.\n".to_vec());
}
