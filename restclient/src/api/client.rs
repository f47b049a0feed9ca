use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::codes::{ErrorCode, NoErrorCode};
use super::common::RequestOptions;
use super::config::{ClientConfig, RetryConfig};
use super::error::{ApiCallError, ApiResult};
use super::hooks::{ClientHooks, DefaultHooks};
use super::response::decode_json;

/// Base client for a JSON REST API.
///
/// `E` is the set of domain error codes the API reports in its error bodies
/// and `H` supplies per-API headers and error-code extraction.
pub struct ApiClient<E: ErrorCode = NoErrorCode, H: ClientHooks = DefaultHooks> {
    inner: Arc<ClientInner<E, H>>,
}

struct ClientInner<E, H> {
    http_client: HttpClient,
    base_url: String,
    hooks: H,
    retry_config: RetryConfig,
    errors_by_code: HashMap<String, E>,
}

impl<E: ErrorCode, H: ClientHooks> Clone for ApiClient<E, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: ErrorCode> ApiClient<E, DefaultHooks> {
    /// Create a new API client with default configuration
    pub fn new(base_url: &str) -> ApiResult<Self, E> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> ApiResult<Self, E> {
        Self::with_hooks(config, DefaultHooks)
    }
}

impl<E: ErrorCode, H: ClientHooks> ApiClient<E, H> {
    pub fn with_hooks(config: ClientConfig, hooks: H) -> ApiResult<Self, E> {
        let http_client = HttpClient::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(request_timeout(config.timeout_seconds))
            .build()
            .map_err(|e| ApiCallError::<E>::transport("Failed to build HTTP client", None, e))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                hooks,
                retry_config: config.retry,
                errors_by_code: E::by_code(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    pub fn errors_by_code(&self) -> &HashMap<String, E> {
        &self.inner.errors_by_code
    }

    pub fn hooks(&self) -> &H {
        &self.inner.hooks
    }

    pub(crate) fn http_client(&self) -> &HttpClient {
        &self.inner.http_client
    }

    /// Resolve a path against the base URL, or take it verbatim when absolute.
    pub fn url(&self, path: &str, path_abs: bool) -> String {
        if path_abs {
            path.to_string()
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// Execute a GET request
    pub fn get<T, F>(&self, path: &str, options: RequestOptions, handler: F) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        self.request(Method::GET, path, options, handler)
    }

    /// Execute a PUT request
    pub fn put<T, F>(&self, path: &str, options: RequestOptions, handler: F) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        self.request(Method::PUT, path, options, handler)
    }

    /// Execute a POST request
    pub fn post<T, F>(&self, path: &str, options: RequestOptions, handler: F) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        self.request(Method::POST, path, options, handler)
    }

    /// Execute a PATCH request
    pub fn patch<T, F>(&self, path: &str, options: RequestOptions, handler: F) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        self.request(Method::PATCH, path, options, handler)
    }

    /// Execute a DELETE request
    pub fn delete<T, F>(&self, path: &str, options: RequestOptions, handler: F) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        self.request(Method::DELETE, path, options, handler)
    }

    /// Execute a request, retrying 404 responses per the retry configuration.
    ///
    /// A 2xx response is passed to `handler` and its output returned. Transport
    /// failures are returned immediately. Any other response is classified
    /// against the known error codes.
    pub fn request<T, F>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
        handler: F,
    ) -> ApiResult<T, E>
    where
        F: FnOnce(Response) -> T,
    {
        let url = self.url(path, options.path_abs);
        let target = with_query(&url, &options);
        let retry_count = self.inner.retry_config.retry_count;
        let retry_delay = self.inner.retry_config.retry_delay();
        let mut attempt = 0;

        let response = loop {
            tracing::debug!("{} request to: {}", method, target);

            let response = self
                .send(&method, &target, &options)
                .map_err(|e| ApiCallError::<E>::transport(transport_message(&e), Some(&url), e))?;

            if response.status() == StatusCode::NOT_FOUND && attempt < retry_count {
                tracing::warn!(
                    "Call to {} returned 404 (call {} of {}, trying again with delay of {:?})",
                    url,
                    attempt + 1,
                    retry_count,
                    retry_delay
                );
                std::thread::sleep(retry_delay);
                attempt += 1;
                continue;
            }

            break response;
        };

        if response.status().is_success() {
            return Ok(handler(response));
        }

        Err(self.classify(path, &url, response))
    }

    fn send(
        &self,
        method: &Method,
        target: &str,
        options: &RequestOptions,
    ) -> Result<Response, reqwest::Error> {
        let headers = match &options.headers {
            Some(headers) if !headers.is_empty() => headers.clone(),
            _ => self.inner.hooks.headers(&options.context),
        };

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), target)
            .headers(headers);

        if let Some(body) = options.payload() {
            request = request.json(body);
        }

        request.send()
    }

    /// Turn a failed response into an error, matching the body's error code
    /// against the known codes.
    fn classify(&self, path: &str, url: &str, response: Response) -> ApiCallError<E> {
        let status = response.status().as_u16();
        let body = decode_json(response);
        tracing::error!("Error response in call to {}: {}", path, body);

        let known = self
            .inner
            .hooks
            .response_error_code(&body)
            .and_then(|code| self.inner.errors_by_code.get(&code));

        match known {
            Some(error) => ApiCallError::classified(status, error.clone(), url, body),
            None => ApiCallError::status(status, url),
        }
    }
}

/// Zero means no timeout.
fn request_timeout(timeout_seconds: u64) -> Option<Duration> {
    (timeout_seconds > 0).then(|| Duration::from_secs(timeout_seconds))
}

/// Append the query parameters, keeping any fragment at the end.
fn with_query(url: &str, options: &RequestOptions) -> String {
    if options.params.is_empty() {
        return url.to_string();
    }

    let (base, fragment) = match url.find('#') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    };
    let query = options.params.to_query_string();
    if base.contains('?') {
        format!("{}&{}{}", base, &query[1..], fragment)
    } else {
        format!("{}{}{}", base, query, fragment)
    }
}

pub(crate) fn transport_message(error: &reqwest::Error) -> &'static str {
    if error.is_connect() {
        "Connection error"
    } else {
        "Request error"
    }
}
