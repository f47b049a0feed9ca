use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::codes::{ErrorCode, NoErrorCode};

/// Result type alias for API calls
pub type ApiResult<T, E = NoErrorCode> = Result<T, ApiCallError<E>>;

/// Underlying cause of a failure that never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of an API call.
///
/// Built exactly once at the point of failure and never modified afterwards.
/// Depending on where the call failed it carries a subset of the fields:
/// transport failures have a message, URL and cause; API failures have a
/// status code and URL, plus the matched domain error and decoded body when
/// the body named a known error code. Concrete clients may attach extra
/// fields of their own with [`ApiCallError::with_field`].
#[derive(Debug, Error)]
pub struct ApiCallError<E: ErrorCode> {
    status_code: Option<u16>,
    error: Option<E>,
    response_body: Value,
    message: Option<String>,
    url: Option<String>,
    extra: Map<String, Value>,
    #[source]
    cause: Option<TransportError>,
}

impl<E: ErrorCode> ApiCallError<E> {
    fn empty() -> Self {
        Self {
            status_code: None,
            error: None,
            response_body: Value::Object(Map::new()),
            message: None,
            url: None,
            extra: Map::new(),
            cause: None,
        }
    }

    /// Failure with a free-text message and no HTTP response.
    pub fn with_message(message: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            message: Some(message.into()),
            url: url.map(str::to_string),
            ..Self::empty()
        }
    }

    /// Transport failure: the request never produced a response.
    pub fn transport(
        message: impl Into<String>,
        url: Option<&str>,
        cause: impl Into<TransportError>,
    ) -> Self {
        Self {
            cause: Some(cause.into()),
            ..Self::with_message(message, url)
        }
    }

    /// Response failure whose body did not name a known error code.
    pub fn status(status_code: u16, url: &str) -> Self {
        Self {
            status_code: Some(status_code),
            url: Some(url.to_string()),
            ..Self::empty()
        }
    }

    /// Response failure classified as a domain error.
    pub fn classified(status_code: u16, error: E, url: &str, response_body: Value) -> Self {
        Self {
            error: Some(error),
            response_body,
            ..Self::status(status_code, url)
        }
    }

    /// Attach an additional named field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The matched domain error, `None` when the failure was not classified.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(ErrorCode::code)
    }

    pub fn error_name(&self) -> Option<&str> {
        self.error.as_ref().map(ErrorCode::name)
    }

    /// Decoded response body; an empty object unless the failure was classified.
    pub fn response_body(&self) -> &Value {
        &self.response_body
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Fields attached with [`ApiCallError::with_field`].
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn cause(&self) -> Option<&TransportError> {
        self.cause.as_ref()
    }

    pub fn is_transport(&self) -> bool {
        self.cause.is_some()
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

impl<E: ErrorCode> fmt::Display for ApiCallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            return f.write_str(message);
        }

        let mut parts = Vec::new();
        if let Some(status) = self.status_code {
            parts.push(format!("status_code: {}", status));
        }
        if let Some(error) = &self.error {
            parts.push(format!("error: {}", error.code()));
        }
        if let Some(url) = &self.url {
            parts.push(format!("url: {}", url));
        }
        if self.error.is_some() {
            parts.push(format!("response_body: {}", self.response_body));
        }
        for (key, value) in &self.extra {
            parts.push(format!("{}: {}", key, value));
        }
        f.write_str(&parts.join(", "))
    }
}
