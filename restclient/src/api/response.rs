//! Response handlers
//!
//! A handler turns a successful response into the value returned to the
//! caller. Each of these decodes the body as JSON and falls back to an empty
//! object when the body is not valid JSON.

use reqwest::blocking::Response;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Decoded body only.
pub fn json_response(response: Response) -> Value {
    decode_json(response)
}

/// Decoded body and status code.
pub fn json_status_response(response: Response) -> (Value, StatusCode) {
    let status = response.status();
    (decode_json(response), status)
}

/// Decoded body and response headers.
pub fn json_headers_response(response: Response) -> (Value, HeaderMap) {
    let headers = response.headers().clone();
    (decode_json(response), headers)
}

pub(crate) fn decode_json(response: Response) -> Value {
    match response.json::<Value>() {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Response body is not JSON: {}", e);
            Value::Object(Map::new())
        }
    }
}
