//! HTTP response types for the Finbridge SDK.
//!
//! This module provides the [`HttpResponse`] type and the parsed
//! Finbridge header values: pagination and idempotency metadata.

use std::collections::HashMap;
use std::fmt;

/// Server-side idempotency status from the `idem-status` response header.
///
/// Indicates how the API handled a request carrying an `Idempotency-Key`
/// header: `stored` for a fresh request, `replayed` for a deduplicated
/// repeat, `bypassed` when idempotency did not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdempotencyStatus {
    /// The request was processed and its result stored under the key.
    Stored,
    /// Idempotent handling did not apply to this request.
    Bypassed,
    /// A stored result for the same key was returned without reprocessing.
    Replayed,
}

impl IdempotencyStatus {
    /// Parses the `idem-status` header value.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        match header_value {
            "stored" => Some(Self::Stored),
            "bypassed" => Some(Self::Bypassed),
            "replayed" => Some(Self::Replayed),
            _ => None,
        }
    }
}

impl fmt::Display for IdempotencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => write!(f, "stored"),
            Self::Bypassed => write!(f, "bypassed"),
            Self::Replayed => write!(f, "replayed"),
        }
    }
}

/// Pagination metadata parsed from the `pagination-*` response headers.
///
/// Every field defaults to its single-page value and is overridden
/// independently when the corresponding header is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// The current page (`pagination-page`).
    pub page: u32,
    /// The total number of pages (`pagination-page-count`).
    pub page_count: u32,
    /// The page size limit (`pagination-page-limit`).
    pub page_limit: u32,
    /// The total number of records (`pagination-total-count`).
    pub total_count: u32,
    /// Cursor for the next page (`pagination-page-cursor-next`).
    pub page_cursor_next: Option<String>,
    /// Cursor for the previous page (`pagination-page-cursor-prev`).
    pub page_cursor_prev: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_count: 1,
            page_limit: 1,
            total_count: 1,
            page_cursor_next: None,
            page_cursor_prev: None,
        }
    }
}

impl Pagination {
    /// Parses pagination metadata from a lowercase header map.
    ///
    /// Headers that are absent or unparseable leave the corresponding
    /// field at its default.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let mut pagination = Self::default();

        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        if let Some(page) = first("pagination-page").and_then(|v| v.parse().ok()) {
            pagination.page = page;
        }
        if let Some(count) = first("pagination-page-count").and_then(|v| v.parse().ok()) {
            pagination.page_count = count;
        }
        if let Some(limit) = first("pagination-page-limit").and_then(|v| v.parse().ok()) {
            pagination.page_limit = limit;
        }
        if let Some(total) = first("pagination-total-count").and_then(|v| v.parse().ok()) {
            pagination.total_count = total;
        }
        pagination.page_cursor_next = first("pagination-page-cursor-next").cloned();
        pagination.page_cursor_prev = first("pagination-page-cursor-prev").cloned();

        pagination
    }
}

/// An HTTP response from the Finbridge API.
///
/// Contains the status code, a lowercase multi-valued header map, the
/// parsed JSON body, and accessors for the Finbridge-specific headers.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        status: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the `idem-request-id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error
    /// reports to Finbridge support.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("idem-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the parsed `idem-status` header value, if present.
    #[must_use]
    pub fn idempotency_status(&self) -> Option<IdempotencyStatus> {
        self.headers
            .get("idem-status")
            .and_then(|values| values.first())
            .and_then(|value| IdempotencyStatus::parse(value))
    }

    /// Returns pagination metadata parsed from the `pagination-*` headers,
    /// with single-page defaults for absent headers.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::from_headers(&self.headers)
    }
}
