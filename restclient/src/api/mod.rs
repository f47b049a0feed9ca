//! Base client for JSON REST APIs

pub mod client;
pub mod codes;
pub mod common;
pub mod config;
pub mod download;
pub mod error;
pub mod hooks;
pub mod response;

#[cfg(test)]
mod test_helpers;

pub use client::ApiClient;
pub use codes::{ErrorCode, NoErrorCode};
pub use common::{has_payload, ApiQueryParams, RequestOptions};
pub use config::{ClientConfig, RetryConfig};
pub use error::{ApiCallError, ApiResult, TransportError};
pub use hooks::{code_from_value, ClientHooks, DefaultHooks};
pub use response::{json_headers_response, json_response, json_status_response};
