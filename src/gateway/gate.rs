use crate::gateway::Outcome;
use crate::http::request::{Method, RequestHead};

/// Connection-level precondition policy.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    /// Reject requests whose target path is empty once the leading
    /// separator and query string are stripped. Enabled by default; some
    /// deployments turn it off.
    pub require_endpoint: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            require_endpoint: true,
        }
    }
}

/// Checks the request head against the gateway preconditions.
///
/// All checks run in a fixed order, none short-circuits, and the rejection
/// lists every violated precondition as its own newline-terminated line.
/// The body has not been read at this point and never is for a rejection.
pub fn check(head: &RequestHead, policy: &GatePolicy) -> Result<(), Outcome> {
    let mut rejected = String::new();

    if head.method != Method::POST {
        rejected.push_str("Only \"POST\" method is allowed.\n");
    }

    if head.header("Accept") != Some("application/json") {
        rejected.push_str("Client must accept \"application/json\".\n");
    }

    if policy.require_endpoint && head.endpoint().is_empty() {
        rejected.push_str("Empty endpoint is not allowed.\n");
    }

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(Outcome::Failure { message: rejected })
    }
}
