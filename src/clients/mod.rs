//! Transport pipeline for the Finbridge SDK.
//!
//! This module contains the shared request/response pipeline every
//! resource goes through:
//!
//! - [`HttpClient`]: the transport client built from a configuration
//! - [`HttpRequest`] / [`HttpResponse`]: the wire-level request/response types
//! - [`events`]: the [`RequestEvent`](events::RequestEvent) and
//!   [`ResponseEvent`](events::ResponseEvent) handed to observers
//! - [`errors`]: the typed error taxonomy and raw transport errors

pub mod errors;
pub mod events;
pub mod http_client;
pub mod http_request;
pub mod http_response;

pub use errors::{ApiError, ApiErrorKind, HttpError, InvalidHttpRequestError};
pub use events::{RequestEvent, ResponseEvent};
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, IdempotencyStatus, Pagination};
