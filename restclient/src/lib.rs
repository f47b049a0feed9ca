//! Blocking base client for JSON REST APIs.
//!
//! [`ApiClient`] sends requests relative to a base URL, retries transient
//! 404 responses a fixed number of times and turns failed responses into an
//! [`ApiCallError`] carrying the domain error code named in the body.

pub mod api;

pub use api::{
    json_headers_response, json_response, json_status_response, ApiCallError, ApiClient,
    ApiQueryParams, ApiResult, ClientConfig, ClientHooks, DefaultHooks, ErrorCode, NoErrorCode,
    RequestOptions, RetryConfig, TransportError,
};
