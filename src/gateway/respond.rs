use serde_json::{Map, Value};

use crate::gateway::Outcome;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Maps an [`Outcome`] to a fully assembled HTTP response.
///
/// - Success → 200 with a JSON object: `{"key": ...}` for writes,
///   `{"key": ..., "value": <string|null>}` for reads.
/// - Failure → 400 with the plain-text message, newline-terminated.
pub fn into_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Success { key, value } => {
            let mut object = Map::new();
            object.insert("key".to_string(), Value::String(key));
            if let Some(value) = value {
                object.insert("value".to_string(), value);
            }
            let body = Value::Object(object).to_string().into_bytes();

            ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", "application/json")
                .body(body)
                .build()
        }

        Outcome::Failure { mut message } => {
            if !message.ends_with('\n') {
                message.push('\n');
            }

            ResponseBuilder::new(StatusCode::BadRequest)
                .body(message.into_bytes())
                .build()
        }
    }
}
