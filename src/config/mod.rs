//! Configuration types for the Finbridge SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK for API communication with Finbridge.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Configuration`]: The main configuration struct holding all SDK settings
//! - [`ConfigurationBuilder`]: A builder for constructing [`Configuration`] instances
//! - [`Environment`]: The Finbridge environment selecting a known base URL
//! - [`RetryPolicy`]: An optional retry descriptor passed through to the transport
//!
//! # Example
//!
//! ```rust
//! use finbridge::{Configuration, Environment};
//!
//! let config = Configuration::builder()
//!     .environment(Environment::Dev)
//!     .api_key("sk_test_key")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://dev.finbridge.com");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::events::{RequestEvent, ResponseEvent};
use crate::error::ConfigError;

/// Observer invoked with a [`RequestEvent`] before each outgoing request.
///
/// Observers run synchronously in the request lifecycle. A panicking
/// observer aborts the call it observes; implementations that want
/// requests to proceed must not panic.
pub type RequestObserver = Arc<dyn Fn(&RequestEvent) + Send + Sync>;

/// Observer invoked with a [`ResponseEvent`] after each completed call,
/// on both the success and failure paths.
pub type ResponseObserver = Arc<dyn Fn(&ResponseEvent) + Send + Sync>;

/// The Finbridge environment a client talks to.
///
/// Each environment maps to a fixed base URL. An explicit base URL
/// override on the builder takes precedence over the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Live environment (`https://production.finbridge.com`).
    Production,
    /// Sandbox environment with simulated money movement.
    Sandbox,
    /// Development environment with test fixtures.
    Dev,
}

impl Environment {
    /// Returns the base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://production.finbridge.com",
            Self::Sandbox => "https://sandbox.finbridge.com",
            Self::Dev => "https://dev.finbridge.com",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
            Self::Dev => write!(f, "dev"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            "dev" => Ok(Self::Dev),
            other => Err(ConfigError::InvalidEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

/// Retry descriptor passed through to the transport client.
///
/// Retries apply to network errors and to the configured status codes
/// only. The policy is idempotency-agnostic across verbs: enabling
/// retries does not disable them for `POST`. Callers who enable retries
/// and must prevent duplicate creates are responsible for supplying an
/// idempotency key on `create`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts (1 means no retries).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
    /// Status codes that trigger a retry.
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// Returns `true` if the given status code should be retried.
    #[must_use]
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }
}

/// Configuration for the Finbridge SDK.
///
/// Holds the base URL, API key, optional request/response observers, and
/// an optional retry policy. Immutable after construction except for the
/// path-scoping derivation [`Configuration::with_path`], which clones.
///
/// # Thread Safety
///
/// `Configuration` is `Clone`, `Send`, and `Sync`. Observer callbacks are
/// shared by `Arc`; cloning a configuration shares no mutable state with
/// the original.
#[derive(Clone)]
pub struct Configuration {
    base_url: String,
    api_key: String,
    on_request: Option<RequestObserver>,
    on_response: Option<ResponseObserver>,
    retry_policy: Option<RetryPolicy>,
}

// Verify Configuration is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Configuration>();
};

impl Configuration {
    /// Creates a new builder for constructing a `Configuration`.
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the request observer, if configured.
    #[must_use]
    pub const fn on_request(&self) -> Option<&RequestObserver> {
        self.on_request.as_ref()
    }

    /// Returns the response observer, if configured.
    #[must_use]
    pub const fn on_response(&self) -> Option<&ResponseObserver> {
        self.on_response.as_ref()
    }

    /// Returns the retry policy, if configured.
    #[must_use]
    pub const fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry_policy.as_ref()
    }

    /// Returns a new `Configuration` whose base URL is extended with the
    /// given path segment.
    ///
    /// All other fields are copied. The receiver is never mutated, and no
    /// re-validation occurs. This is how the URL hierarchy for nested and
    /// sub resources is built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use finbridge::{Configuration, Environment};
    ///
    /// let config = Configuration::builder()
    ///     .environment(Environment::Dev)
    ///     .api_key("sk_test_key")
    ///     .build()
    ///     .unwrap();
    ///
    /// let scoped = config.with_path("accounts");
    /// assert_eq!(scoped.base_url(), "https://dev.finbridge.com/accounts");
    /// assert_eq!(config.base_url(), "https://dev.finbridge.com");
    /// ```
    #[must_use]
    pub fn with_path(&self, segment: &str) -> Self {
        let mut scoped = self.clone();
        scoped.base_url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            segment.trim_matches('/')
        );
        scoped
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // API key is masked; observers are opaque closures.
        f.debug_struct("Configuration")
            .field("base_url", &self.base_url)
            .field("api_key", &"********")
            .field("on_request", &self.on_request.as_ref().map(|_| "<observer>"))
            .field(
                "on_response",
                &self.on_response.as_ref().map(|_| "<observer>"),
            )
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

/// Builder for constructing [`Configuration`] instances.
///
/// Required inputs are a non-empty API key and either an [`Environment`]
/// or an explicit base URL (the explicit URL takes precedence when both
/// are set).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use finbridge::{Configuration, Environment, RetryPolicy};
///
/// let config = Configuration::builder()
///     .environment(Environment::Sandbox)
///     .api_key("sk_test_key")
///     .retry_policy(RetryPolicy {
///         max_attempts: 3,
///         backoff: Duration::from_millis(250),
///         retry_statuses: vec![429, 500],
///     })
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
    environment: Option<Environment>,
    base_url: Option<String>,
    api_key: Option<String>,
    on_request: Option<RequestObserver>,
    on_response: Option<ResponseObserver>,
    retry_policy: Option<RetryPolicy>,
}

impl ConfigurationBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the environment selecting a known base URL.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets an explicit base URL, overriding the environment.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the observer invoked before each outgoing request.
    #[must_use]
    pub fn on_request(mut self, observer: impl Fn(&RequestEvent) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Arc::new(observer));
        self
    }

    /// Sets the observer invoked after each completed call.
    #[must_use]
    pub fn on_response(
        mut self,
        observer: impl Fn(&ResponseEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_response = Some(Arc::new(observer));
        self
    }

    /// Sets the retry policy passed through to the transport client.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Builds the [`Configuration`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the API key is missing or
    /// empty, [`ConfigError::MissingBaseUrl`] if neither an environment
    /// nor a base URL is set, and [`ConfigError::InvalidBaseUrl`] if the
    /// explicit base URL does not parse.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let api_key = self.api_key.filter(|k| !k.is_empty());
        let api_key = api_key.ok_or(ConfigError::EmptyApiKey)?;

        let base_url = match (self.base_url, self.environment) {
            (Some(url), _) => {
                reqwest::Url::parse(&url)
                    .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
                url.trim_end_matches('/').to_string()
            }
            (None, Some(environment)) => environment.base_url().to_string(),
            (None, None) => return Err(ConfigError::MissingBaseUrl),
        };

        Ok(Configuration {
            base_url,
            api_key,
            on_request: self.on_request,
            on_response: self.on_response,
            retry_policy: self.retry_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_config() -> Configuration {
        Configuration::builder()
            .environment(Environment::Dev)
            .api_key("sk_test_key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            Environment::Production.base_url(),
            "https://production.finbridge.com"
        );
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://sandbox.finbridge.com"
        );
        assert_eq!(Environment::Dev.base_url(), "https://dev.finbridge.com");
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Dev));
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment { value }) if value == "staging"
        ));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = Configuration::builder()
            .environment(Environment::Dev)
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        let result = Configuration::builder()
            .environment(Environment::Dev)
            .api_key("")
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_builder_requires_environment_or_base_url() {
        let result = Configuration::builder().api_key("sk_test_key").build();
        assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_explicit_base_url_takes_precedence_over_environment() {
        let config = Configuration::builder()
            .environment(Environment::Production)
            .base_url("https://api.example.test")
            .api_key("sk_test_key")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "https://api.example.test");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = Configuration::builder()
            .base_url("not a url")
            .api_key("sk_test_key")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_with_path_extends_without_mutating() {
        let config = dev_config();
        let scoped = config.with_path("accounts");

        assert_eq!(config.base_url(), "https://dev.finbridge.com");
        assert_eq!(scoped.base_url(), "https://dev.finbridge.com/accounts");
    }

    #[test]
    fn test_with_path_chains_for_sub_resources() {
        let scoped = dev_config().with_path("accounts").with_path("acc_1");
        assert_eq!(
            scoped.base_url(),
            "https://dev.finbridge.com/accounts/acc_1"
        );
    }

    #[test]
    fn test_with_path_trims_slashes() {
        let scoped = dev_config().with_path("/accounts/");
        assert_eq!(scoped.base_url(), "https://dev.finbridge.com/accounts");
    }

    #[test]
    fn test_debug_masks_api_key() {
        let debug = format!("{:?}", dev_config());
        assert!(!debug.contains("sk_test_key"));
        assert!(debug.contains("********"));
    }

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert!(policy.should_retry_status(429));
        assert!(policy.should_retry_status(503));
        assert!(!policy.should_retry_status(404));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Configuration>();
    }
}
