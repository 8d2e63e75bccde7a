//! HTTP and API error types for the Finbridge SDK.
//!
//! The SDK distinguishes two failure families:
//!
//! - **Structured API errors** ([`ApiError`]): the response body matches
//!   the documented envelope `{data: {error: {type, sub_type, message,
//!   code}}}`. These are translated into the typed taxonomy below.
//! - **Raw transport failures** ([`HttpError::Network`],
//!   [`HttpError::Response`]): timeouts, connection resets, non-JSON
//!   bodies, and non-2xx responses without the envelope. These pass
//!   through untranslated.
//!
//! # Example
//!
//! ```rust,ignore
//! use finbridge::clients::{ApiErrorKind, HttpError};
//!
//! match client.accounts.retrieve("acc_1").await {
//!     Ok(account) => println!("status: {:?}", account.status),
//!     Err(HttpError::Api(e)) if e.kind == ApiErrorKind::Authorization => {
//!         eprintln!("bad API key: {}", e.message);
//!     }
//!     Err(HttpError::Api(e)) => eprintln!("API rejected the call: {}", e.message),
//!     Err(e) => eprintln!("transport failure: {e}"),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::clients::http_response::{HttpResponse, IdempotencyStatus};

/// Envelope `type` values documented by Finbridge.
const TYPE_INVALID_AUTHORIZATION: &str = "INVALID_AUTHORIZATION";
const TYPE_INVALID_REQUEST: &str = "INVALID_REQUEST";
const TYPE_API_ERROR: &str = "API_ERROR";

/// The taxonomy kind of a structured API error, selected by the
/// envelope's `type` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// `INVALID_AUTHORIZATION`: bad or missing API key, or insufficient scope.
    Authorization,
    /// `INVALID_REQUEST`: malformed input, validation failure, or a
    /// business-rule rejection.
    InvalidRequest,
    /// `API_ERROR`: a fault on the Finbridge side.
    Internal,
    /// Any `type` value the SDK does not recognize. The raw value is
    /// preserved so callers can still branch on it.
    Unknown(String),
}

impl ApiErrorKind {
    fn from_type(error_type: &str) -> Self {
        match error_type {
            TYPE_INVALID_AUTHORIZATION => Self::Authorization,
            TYPE_INVALID_REQUEST => Self::InvalidRequest,
            TYPE_API_ERROR => Self::Internal,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A structured error returned by the Finbridge API.
///
/// Constructed from the error envelope attached to a non-2xx response.
/// All four envelope fields are carried verbatim for programmatic
/// branching; idempotency metadata is attached when available so callers
/// can distinguish a replayed failure from a fresh one.
#[derive(Clone, Debug, Error)]
#[error("{error_type}: {message} (sub_type: {sub_type}, code: {code})")]
pub struct ApiError {
    /// The taxonomy kind derived from `error_type`.
    pub kind: ApiErrorKind,
    /// The envelope's `type` field, verbatim.
    pub error_type: String,
    /// The envelope's `sub_type` field, verbatim.
    pub sub_type: String,
    /// The envelope's `message` field, verbatim.
    pub message: String,
    /// The envelope's `code` field, verbatim.
    pub code: i64,
    /// The `idem-status` header of the failing response, if present.
    pub idempotency_status: Option<IdempotencyStatus>,
    /// The `Idempotency-Key` the failing request carried, if any.
    pub idempotency_key: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    data: ErrorEnvelopeData,
}

#[derive(Deserialize)]
struct ErrorEnvelopeData {
    error: ErrorEnvelopeBody,
}

#[derive(Deserialize)]
struct ErrorEnvelopeBody {
    #[serde(rename = "type")]
    error_type: String,
    sub_type: String,
    message: String,
    code: i64,
}

impl ApiError {
    /// Attempts to translate a failing response into a typed API error.
    ///
    /// Returns `None` when the body does not match the structured error
    /// envelope; such failures must propagate as the raw transport error.
    /// An unrecognized `type` value still translates, into
    /// [`ApiErrorKind::Unknown`], and is logged at `warn`.
    #[must_use]
    pub fn from_response(response: &HttpResponse, idempotency_key: Option<&str>) -> Option<Self> {
        let envelope: ErrorEnvelope = serde_json::from_value(response.body.clone()).ok()?;
        let body = envelope.data.error;

        let kind = ApiErrorKind::from_type(&body.error_type);
        if let ApiErrorKind::Unknown(ref raw) = kind {
            tracing::warn!(
                error_type = raw.as_str(),
                "Unrecognized Finbridge error type; surfacing as ApiErrorKind::Unknown"
            );
        }

        Some(Self {
            kind,
            error_type: body.error_type,
            sub_type: body.sub_type,
            message: body.message,
            code: body.code,
            idempotency_status: response.idempotency_status(),
            idempotency_key: idempotency_key.map(ToString::to_string),
        })
    }
}

/// Error returned when a request fails validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all pipeline failures.
///
/// `Api` carries the translated taxonomy; every other variant is a raw,
/// untranslated failure.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A structured API error translated from the response envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A non-2xx response whose body does not match the error envelope.
    /// Passed through untranslated.
    #[error("HTTP {status}: {body}")]
    Response {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: serde_json::Value,
        /// The `idem-request-id` header value, if present.
        request_id: Option<String>,
    },

    /// Network or connection error from the transport. Passed through
    /// untranslated.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A body failed to (de)serialize: either a request payload could not
    /// be serialized, or a 2xx response did not match the expected shape.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
