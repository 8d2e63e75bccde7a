//! Configuration error types for the Finbridge SDK.
//!
//! This module contains the errors raised synchronously while building a
//! [`Configuration`](crate::Configuration). These are fatal, local errors:
//! they are never retried and are not part of the API error taxonomy in
//! [`clients::errors`](crate::clients::errors).
//!
//! # Example
//!
//! ```rust
//! use finbridge::{Configuration, ConfigError, Environment};
//!
//! let result = Configuration::builder()
//!     .environment(Environment::Dev)
//!     .api_key("")
//!     .build();
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`Configuration`](crate::Configuration).
///
/// Each variant carries a clear, actionable message. Configuration errors
/// are raised before any request is made and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Finbridge API key.")]
    EmptyApiKey,

    /// The environment string is not one of the known environments.
    #[error("Unrecognized environment '{value}'. Expected one of: 'production', 'sandbox', 'dev'.")]
    InvalidEnvironment {
        /// The unrecognized environment that was provided.
        value: String,
    },

    /// Neither an environment nor an explicit base URL was provided.
    #[error("No base URL configured. Set an environment or an explicit base URL.")]
    MissingBaseUrl,

    /// The explicit base URL override is not a valid URL.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://dev.finbridge.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let error = ConfigError::EmptyApiKey;
        let message = error.to_string();
        assert!(message.contains("API key cannot be empty"));
        assert!(message.contains("valid Finbridge API key"));
    }

    #[test]
    fn test_invalid_environment_error_message() {
        let error = ConfigError::InvalidEnvironment {
            value: "staging".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("staging"));
        assert!(message.contains("production"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingBaseUrl;
        let _: &dyn std::error::Error = &error;
    }
}
