//! Request validation and dispatch pipeline.
//!
//! Every request flows through the same fixed stages, each of which can
//! short-circuit with a terminal [`Outcome`]:
//!
//! 1. **gate** - connection-level preconditions, checked before the body is read
//! 2. **command** - field validation of the decoded JSON command
//! 3. **dispatch** - exactly one store operation per valid command
//! 4. **respond** - the single Outcome becomes the entire HTTP response

pub mod command;
pub mod dispatch;
pub mod gate;
pub mod respond;

use serde_json::Value;

use self::command::RawCommand;
use crate::store::Store;

/// The single success-or-failure result produced per request.
///
/// Exactly one `Outcome` is created per request - by the gate, the command
/// validation, or the dispatcher - and it is consumed exactly once when the
/// response is built.
///
/// `value` is carried only for reads: the stored string, or JSON null when
/// the key is absent. Writes never echo the written value back.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { key: String, value: Option<Value> },
    Failure { message: String },
}

/// Decodes and validates a command body, then runs it against the store.
///
/// Decode failures and validation failures never reach the store; a valid
/// command performs exactly one store operation.
pub async fn execute<S: Store>(store: &S, body: &[u8]) -> Outcome {
    // A command body must be a JSON object; serde would also map an array
    // onto the fields positionally, which is not a shape clients may send.
    let decoded = match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        _ => {
            return Outcome::Failure {
                message: "malformed command body".to_string(),
            };
        }
    };

    let raw: RawCommand = match serde_json::from_value(decoded) {
        Ok(raw) => raw,
        Err(_) => {
            return Outcome::Failure {
                message: "malformed command body".to_string(),
            };
        }
    };

    let command = match raw.validate() {
        Ok(command) => command,
        Err(message) => return Outcome::Failure { message },
    };

    dispatch::dispatch(store, command).await
}
