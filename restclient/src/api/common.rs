//! Common request types

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

/// Per-call options shared by every verb method.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Explicit headers. When set, the client's header hook is not consulted.
    pub headers: Option<HeaderMap>,
    /// JSON body, only sent when it carries a payload (see [`has_payload`]).
    pub body: Option<Value>,
    pub params: ApiQueryParams,
    /// Treat the path as a complete URL instead of joining it to the base.
    pub path_abs: bool,
    /// Free-form values handed to the header hook.
    pub context: HashMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_params(mut self, params: ApiQueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn absolute(mut self) -> Self {
        self.path_abs = true;
        self
    }

    pub fn with_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Body to send, if any.
    pub(crate) fn payload(&self) -> Option<&Value> {
        self.body.as_ref().filter(|body| has_payload(body))
    }
}

/// Whether a JSON value is worth sending: null and empty containers or
/// strings are not.
pub fn has_payload(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
