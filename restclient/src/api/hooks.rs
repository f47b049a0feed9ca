//! Override points for concrete API clients

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

/// Customisation hooks consulted by the client on every call.
///
/// Both methods have defaults, so an API with no authentication and the
/// conventional `{"error": "<code>"}` body needs no implementation at all
/// and can use [`DefaultHooks`].
pub trait ClientHooks: Send + Sync {
    /// Headers for a call that did not supply its own.
    fn headers(&self, _context: &HashMap<String, String>) -> HeaderMap {
        HeaderMap::new()
    }

    /// Extract the domain error code from a decoded error body.
    fn response_error_code(&self, body: &Value) -> Option<String> {
        body.get("error").and_then(code_from_value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl ClientHooks for DefaultHooks {}

/// Strings are taken as-is, numbers in their decimal form.
pub fn code_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
