//! Request and response lifecycle events.
//!
//! Events are handed to the observer callbacks configured on a
//! [`Configuration`](crate::Configuration). They are built per call,
//! read-only, and discarded after the observer returns. A clone of the
//! [`ResponseEvent`] also travels back to the caller as the
//! `last_response` field of [`ApiResponse`](crate::resources::ApiResponse).

use chrono::{DateTime, Utc};

use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::{HttpResponse, IdempotencyStatus, Pagination};

/// Event describing an outgoing request, emitted before it is sent.
#[derive(Clone, Debug)]
pub struct RequestEvent {
    /// The `Idempotency-Key` header value, if one is attached.
    pub idempotency_key: Option<String>,
    /// The HTTP method.
    pub method: HttpMethod,
    /// The resolved request path (URL minus query).
    pub path: String,
    /// When the request started.
    pub request_start_time: DateTime<Utc>,
}

/// Event describing a completed call, emitted on both the success and
/// failure paths whenever a response was received.
#[derive(Clone, Debug)]
pub struct ResponseEvent {
    /// The `idem-request-id` header value, if present.
    pub request_id: Option<String>,
    /// The parsed `idem-status` header value, if present.
    pub idempotency_status: Option<IdempotencyStatus>,
    /// The HTTP method.
    pub method: HttpMethod,
    /// The resolved request path (URL minus query).
    pub path: String,
    /// The HTTP status code.
    pub status: u16,
    /// When the request started.
    pub request_start_time: DateTime<Utc>,
    /// When the response was received.
    pub request_end_time: DateTime<Utc>,
    /// Pagination metadata, single-page defaults when headers are absent.
    pub pagination: Pagination,
}

impl ResponseEvent {
    /// Builds a response event from a received response and the timing
    /// recorded for the request.
    #[must_use]
    pub fn from_response(
        response: &HttpResponse,
        method: HttpMethod,
        path: &str,
        request_start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id: response.request_id().map(ToString::to_string),
            idempotency_status: response.idempotency_status(),
            method,
            path: path.to_string(),
            status: response.status,
            request_start_time,
            request_end_time: Utc::now(),
            pagination: response.pagination(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_response_event_captures_headers_and_timing() {
        let mut headers = HashMap::new();
        headers.insert(
            "idem-request-id".to_string(),
            vec!["req_123".to_string()],
        );
        headers.insert("idem-status".to_string(), vec!["stored".to_string()]);
        headers.insert("pagination-page".to_string(), vec!["2".to_string()]);

        let start = Utc::now();
        let response = HttpResponse::new(200, headers, json!({"data": {}}));
        let event = ResponseEvent::from_response(&response, HttpMethod::Get, "/accounts", start);

        assert_eq!(event.request_id.as_deref(), Some("req_123"));
        assert_eq!(event.idempotency_status, Some(IdempotencyStatus::Stored));
        assert_eq!(event.status, 200);
        assert_eq!(event.path, "/accounts");
        assert_eq!(event.pagination.page, 2);
        assert_eq!(event.request_start_time, start);
        assert!(event.request_end_time >= start);
    }

    #[test]
    fn test_response_event_defaults_without_headers() {
        let response = HttpResponse::new(404, HashMap::new(), json!({}));
        let event =
            ResponseEvent::from_response(&response, HttpMethod::Delete, "/accounts/acc_1", Utc::now());

        assert!(event.request_id.is_none());
        assert!(event.idempotency_status.is_none());
        assert_eq!(event.pagination, Pagination::default());
    }
}
