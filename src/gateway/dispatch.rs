use serde_json::Value;

use crate::gateway::Outcome;
use crate::gateway::command::Command;
use crate::store::Store;

/// Runs a validated command against the store.
///
/// Each command performs exactly one store operation; the match arms are
/// mutually exclusive, so a read can never trigger a write. Store failures
/// surface as-is and are not retried.
pub async fn dispatch<S: Store>(store: &S, command: Command) -> Outcome {
    match command {
        Command::Get { key } => match store.get(&key).await {
            Ok(value) => Outcome::Success {
                key,
                value: Some(value.map_or(Value::Null, Value::String)),
            },
            Err(e) => Outcome::Failure {
                message: e.to_string(),
            },
        },

        Command::Set { key, value } => match store.set(&key, &value).await {
            Ok(()) => Outcome::Success { key, value: None },
            Err(e) => Outcome::Failure {
                message: e.to_string(),
            },
        },
    }
}
