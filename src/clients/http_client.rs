//! HTTP client for Finbridge API communication.
//!
//! This module provides the [`HttpClient`] type: the transport client
//! built from a [`Configuration`], carrying the auth header, the SDK
//! user agent, the observer interceptors, configured retry behavior,
//! and error normalization from HTTP responses into the typed taxonomy.

use std::collections::HashMap;

use chrono::Utc;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::events::{RequestEvent, ResponseEvent};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{Configuration, RequestObserver, ResponseObserver, RetryPolicy};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one resource-path root.
///
/// The client handles:
/// - URL construction from the configuration's (path-scoped) base URL
/// - Default headers: `Authorization: Bearer {key}` and the SDK User-Agent
/// - The request interceptor (start timestamp, `on_request` observer)
/// - The response interceptor (`on_response` observer, error translation)
/// - Retry behavior per the configured [`RetryPolicy`]
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async
/// tasks. No per-call state is stored on the client: headers and
/// timestamps are attached to the individual in-flight request.
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://dev.finbridge.com/accounts`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Optional retry descriptor from the configuration.
    retry_policy: Option<RetryPolicy>,
    /// Observer invoked before each outgoing request.
    on_request: Option<RequestObserver>,
    /// Observer invoked after each completed call.
    on_response: Option<ResponseObserver>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Observers are opaque closures; the auth header is masked.
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given (path-scoped) configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("Finbridge Rust SDK v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key()),
        );
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().to_string(),
            default_headers,
            retry_policy: config.retry_policy().cloned(),
            on_request: config.on_request().cloned(),
            on_response: config.on_response().cloned(),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request through the pipeline.
    ///
    /// Runs strictly in order: request interceptor, network call (with
    /// retries per policy), response interceptor. The returned
    /// [`ResponseEvent`] describes the surfaced attempt; retried attempts
    /// are not observed individually.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs and retries are exhausted (`Network`)
    /// - A non-2xx response carries the structured error envelope (`Api`)
    /// - A non-2xx response does not carry the envelope (`Response`)
    pub async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<(HttpResponse, ResponseEvent), HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request.path);
        let resolved_path = reqwest::Url::parse(&url)
            .map_or_else(|_| request.path.clone(), |u| u.path().to_string());

        // Request interceptor: stamp the start time, notify the observer.
        let request_start_time = Utc::now();
        if let Some(observer) = &self.on_request {
            observer(&RequestEvent {
                idempotency_key: request.idempotency_key.clone(),
                method: request.method,
                path: resolved_path.clone(),
                request_start_time,
            });
        }

        let max_attempts = self
            .retry_policy
            .as_ref()
            .map_or(1, |policy| policy.max_attempts.max(1));

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let result = self.send_once(&request, &url).await;

            let response = match result {
                Ok(response) => response,
                Err(network_error) => {
                    if attempt < max_attempts {
                        self.backoff(attempt, "network error").await;
                        continue;
                    }
                    return Err(HttpError::Network(network_error));
                }
            };

            let retryable = !response.is_ok()
                && self
                    .retry_policy
                    .as_ref()
                    .is_some_and(|policy| policy.should_retry_status(response.status));
            if retryable && attempt < max_attempts {
                self.backoff(attempt, "retryable status").await;
                continue;
            }

            // Response interceptor: observe the surfaced attempt on both
            // the success and failure paths, then translate failures.
            let event = ResponseEvent::from_response(
                &response,
                request.method,
                &resolved_path,
                request_start_time,
            );
            if let Some(observer) = &self.on_response {
                observer(&event);
            }

            if response.is_ok() {
                return Ok((response, event));
            }

            if let Some(api_error) =
                ApiError::from_response(&response, request.idempotency_key.as_deref())
            {
                return Err(HttpError::Api(api_error));
            }

            let request_id = response.request_id().map(ToString::to_string);
            return Err(HttpError::Response {
                status: response.status,
                body: response.body,
                request_id,
            });
        }
    }

    /// Performs a single network attempt.
    async fn send_once(
        &self,
        request: &HttpRequest,
        url: &str,
    ) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if let Some(key) = &request.idempotency_key {
            builder = builder.header("Idempotency-Key", key);
        }
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder.send().await?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        // Non-JSON bodies are preserved raw so the failure can propagate
        // untranslated.
        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        Ok(HttpResponse::new(status, headers, body))
    }

    /// Builds the full request URL from the base URL and relative path.
    fn resolve_url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    /// Sleeps for the configured backoff before the next attempt.
    async fn backoff(&self, attempt: u32, reason: &str) {
        let delay = self
            .retry_policy
            .as_ref()
            .map_or_else(|| std::time::Duration::from_secs(1), |policy| policy.backoff);
        tracing::debug!(attempt, reason, delay_ms = delay.as_millis() as u64, "Retrying request");
        tokio::time::sleep(delay).await;
    }

    /// Parses response headers into a lowercase multi-valued map.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn dev_config() -> Configuration {
        Configuration::builder()
            .environment(Environment::Dev)
            .api_key("sk_test_key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_carries_bearer_auth_header() {
        let client = HttpClient::new(&dev_config());
        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer sk_test_key".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&dev_config());
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Finbridge Rust SDK v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&dev_config());
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_base_url_from_scoped_configuration() {
        let client = HttpClient::new(&dev_config().with_path("accounts"));
        assert_eq!(client.base_url(), "https://dev.finbridge.com/accounts");
    }

    #[test]
    fn test_resolve_url_joins_relative_paths() {
        let client = HttpClient::new(&dev_config().with_path("accounts"));
        assert_eq!(
            client.resolve_url("acc_1"),
            "https://dev.finbridge.com/accounts/acc_1"
        );
        assert_eq!(
            client.resolve_url("/acc_1/balances"),
            "https://dev.finbridge.com/accounts/acc_1/balances"
        );
        assert_eq!(client.resolve_url(""), "https://dev.finbridge.com/accounts");
    }

    #[test]
    fn test_execute_rejects_bodyless_post_before_sending() {
        let client = HttpClient::new(&dev_config());
        let request = HttpRequest {
            method: HttpMethod::Post,
            path: String::new(),
            body: None,
            query: None,
            idempotency_key: None,
        };
        let result = tokio_test::block_on(client.execute(request));
        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
