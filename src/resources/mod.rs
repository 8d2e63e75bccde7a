//! Resource layer for the Finbridge SDK.
//!
//! This module defines the [`Resource`] base type whose verb-shaped
//! primitives (`get`, `list`, `create`, `update`, `delete`, `download`,
//! and their sub-path variants) every concrete resource composes. Each
//! primitive is a thin wrapper over the transport client that unwraps
//! the `{data: T}` envelope and attaches the call's [`ResponseEvent`]
//! as `last_response`.
//!
//! # Implementing a resource
//!
//! A concrete resource owns a `Resource` scoped to its URL segment via
//! [`Configuration::with_path`] and exposes typed methods built from the
//! primitives:
//!
//! ```rust,ignore
//! pub struct Webhooks {
//!     resource: Resource,
//! }
//!
//! impl Webhooks {
//!     pub(crate) fn new(config: &Configuration) -> Self {
//!         Self { resource: Resource::new(config.with_path("webhooks")) }
//!     }
//!
//!     pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Webhook>, HttpError> {
//!         self.resource.get_with_id(id).await
//!     }
//! }
//! ```

mod account;
mod element;
mod entity;
mod event;
mod healthcheck;
mod merchant;
mod opal;
mod payment;
mod report;
mod simulate;
mod webhook;

pub use account::{
    Account, AccountBalance, AccountBalances, AccountCardBrand, AccountCardBrands,
    AccountCreateRequest, AccountListParams, AccountPayoff, AccountPayoffs, AccountSensitive,
    AccountSensitiveData, AccountSubResources, AccountSubscription, AccountSubscriptions,
    AccountTransaction, AccountTransactions, AccountType, Accounts, AchDetails, LiabilityDetails,
};
pub use element::{ElementToken, ElementTokenRequest, Elements};
pub use entity::{
    Entities, Entity, EntityConnect, EntityConnects, EntityCreateRequest, EntityIndividual,
    EntityListParams, EntitySubResources, EntityType, EntityUpdateRequest,
    EntityVerificationSession, EntityVerificationSessions,
};
pub use event::{ApiEvent, ApiEventListParams, Events};
pub use healthcheck::{HealthCheck, HealthCheckResponse};
pub use merchant::{Merchant, MerchantListParams, Merchants};
pub use opal::{Opal, OpalCreateRequest, OpalSession};
pub use payment::{
    Payment, PaymentCreateRequest, PaymentListParams, PaymentReversal, PaymentReversalUpdate,
    PaymentReversals, PaymentStatus, PaymentSubResources, Payments,
};
pub use report::{Report, ReportCreateRequest, Reports};
pub use simulate::{Simulate, SimulatePaymentUpdate, SimulatePayments};
pub use webhook::{Webhook, WebhookCreateRequest, Webhooks};

use std::collections::HashMap;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::events::ResponseEvent;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::{HttpClient, HttpError};
use crate::config::Configuration;

/// The `{data: T}` success envelope every standard endpoint uses.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Per-call options for create-shaped requests.
///
/// When `idempotency_key` is set, the outgoing request carries it as the
/// `Idempotency-Key` header so the API can dedupe retried creates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Caller-supplied idempotency key.
    pub idempotency_key: Option<String>,
}

impl RequestOptions {
    /// Creates options carrying the given idempotency key.
    #[must_use]
    pub fn idempotency_key(key: impl Into<String>) -> Self {
        Self {
            idempotency_key: Some(key.into()),
        }
    }
}

/// A typed payload plus the metadata of the call that produced it.
///
/// Dereferences to the inner payload; the [`ResponseEvent`] for the call
/// (request id, idempotency status, status code, timings, pagination) is
/// available as `last_response`.
///
/// # Example
///
/// ```rust,ignore
/// let accounts = client.accounts.list(None).await?;
/// println!("page {} of {}", accounts.last_response.pagination.page,
///     accounts.last_response.pagination.page_count);
/// for account in accounts.iter() {
///     println!("{}", account.id);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    inner: T,
    /// Metadata of the call that produced this payload.
    pub last_response: ResponseEvent,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload with its call metadata.
    #[must_use]
    pub const fn new(inner: T, last_response: ResponseEvent) -> Self {
        Self {
            inner,
            last_response,
        }
    }

    /// Consumes the response, returning the inner payload.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// A field that is either an opaque id reference or the expanded object,
/// depending on the `expand` parameters of the call that produced it.
///
/// Deserialized untagged: a JSON string becomes [`Expandable::Id`], an
/// object becomes [`Expandable::Expanded`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Expandable<T> {
    /// The opaque id of the referenced record.
    Id(String),
    /// The fully expanded record.
    Expanded(T),
}

impl<T> Expandable<T> {
    /// Returns the id when the field is an unexpanded reference.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Expanded(_) => None,
        }
    }

    /// Returns the expanded record, if present.
    #[must_use]
    pub const fn as_expanded(&self) -> Option<&T> {
        match self {
            Self::Expanded(value) => Some(value),
            Self::Id(_) => None,
        }
    }
}

/// Base type composed by every concrete resource.
///
/// Owns one [`Configuration`] (already path-scoped to the resource's URL
/// segment by the caller) and one [`HttpClient`] derived from it. All
/// primitives issue requests relative to that scope.
#[derive(Debug)]
pub struct Resource {
    config: Configuration,
    http_client: HttpClient,
}

impl Resource {
    /// Creates a resource bound to the given (path-scoped) configuration.
    #[must_use]
    pub(crate) fn new(config: Configuration) -> Self {
        let http_client = HttpClient::new(&config);
        Self {
            config,
            http_client,
        }
    }

    /// Returns the resource's configuration, for deriving sub-resource
    /// scopes via [`Configuration::with_path`].
    pub(crate) const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Issues `GET` against the resource root and unwraps the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self) -> Result<ApiResponse<T>, HttpError> {
        self.get_with_sub_path("").await
    }

    /// Issues `GET {id}` and unwraps the envelope.
    pub(crate) async fn get_with_id<T: DeserializeOwned>(
        &self,
        id: &str,
    ) -> Result<ApiResponse<T>, HttpError> {
        self.get_with_sub_path(id).await
    }

    /// Issues `GET {path}` and unwraps the envelope.
    pub(crate) async fn get_with_sub_path<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.send(request).await
    }

    /// Issues `GET` with query parameters and unwraps the envelope.
    pub(crate) async fn get_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        params: &P,
    ) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "")
            .query(serialize_to_query(params)?)
            .build()?;
        self.send(request).await
    }

    /// Issues `GET` with optional query parameters, returning the data
    /// array.
    pub(crate) async fn list<T: DeserializeOwned, P: Serialize>(
        &self,
        params: Option<P>,
    ) -> Result<ApiResponse<Vec<T>>, HttpError> {
        match params {
            Some(params) => self.get_with_params(&params).await,
            None => self.get().await,
        }
    }

    /// Issues `POST` against the resource root, propagating any
    /// idempotency key from `opts`.
    pub(crate) async fn create<T: DeserializeOwned, B: Serialize>(
        &self,
        body: &B,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>, HttpError> {
        self.create_with_sub_path("", body, opts).await
    }

    /// Issues `POST {path}`, propagating any idempotency key from `opts`.
    pub(crate) async fn create_with_sub_path<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(serde_json::to_value(body)?)
            .maybe_idempotency_key(opts.and_then(|o| o.idempotency_key))
            .build()?;
        self.send(request).await
    }

    /// Issues `PUT {id}`.
    pub(crate) async fn update_with_id<T: DeserializeOwned, B: Serialize>(
        &self,
        id: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, HttpError> {
        self.update_with_sub_path(id, body, None).await
    }

    /// Issues `PUT {path}`, propagating any idempotency key from `opts`.
    pub(crate) async fn update_with_sub_path<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(serde_json::to_value(body)?)
            .maybe_idempotency_key(opts.and_then(|o| o.idempotency_key))
            .build()?;
        self.send(request).await
    }

    /// Issues `DELETE {id}`.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        id: &str,
    ) -> Result<ApiResponse<T>, HttpError> {
        self.delete_with_sub_path::<T, serde_json::Value>(id, None, None)
            .await
    }

    /// Issues `DELETE {path}` with an optional body, propagating any
    /// idempotency key from `opts`.
    pub(crate) async fn delete_with_sub_path<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Delete, path)
            .maybe_idempotency_key(opts.and_then(|o| o.idempotency_key));
        if let Some(body) = body {
            builder = builder.body(serde_json::to_value(body)?);
        }
        self.send(builder.build()?).await
    }

    /// Issues `POST {id}` for record-scoped, POST-shaped actions.
    pub(crate) async fn post_with_id<T: DeserializeOwned, B: Serialize>(
        &self,
        id: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, id)
            .body(serde_json::to_value(body)?)
            .build()?;
        self.send(request).await
    }

    /// Issues `GET {id}/download`, returning the full body without
    /// unwrapping the envelope. Downloads may carry extra metadata
    /// alongside `data`.
    pub(crate) async fn download(&self, id: &str) -> Result<ApiResponse<Value>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, format!("{id}/download")).build()?;
        self.send_raw(request).await
    }

    /// Issues `GET` against the resource root, returning the full body
    /// without unwrapping the envelope. Used by endpoints whose body is
    /// not `{data: T}`-shaped, like the health check.
    pub(crate) async fn get_raw<T: DeserializeOwned>(&self) -> Result<ApiResponse<T>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "").build()?;
        self.send_raw(request).await
    }

    /// Sends a request and unwraps the `{data: T}` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ApiResponse<T>, HttpError> {
        let (response, event) = self.http_client.execute(request).await?;
        let envelope: Envelope<T> = serde_json::from_value(response.body)?;
        Ok(ApiResponse::new(envelope.data, event))
    }

    /// Sends a request and returns the full body.
    async fn send_raw<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ApiResponse<T>, HttpError> {
        let (response, event) = self.http_client.execute(request).await?;
        let body: T = serde_json::from_value(response.body)?;
        Ok(ApiResponse::new(body, event))
    }
}

/// Serializes a params struct to a query parameter map.
///
/// `None` fields are skipped; arrays become comma-separated values.
fn serialize_to_query<P: Serialize>(params: &P) -> Result<HashMap<String, String>, HttpError> {
    let value = serde_json::to_value(params)?;

    let mut query = HashMap::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_response::Pagination;
    use chrono::Utc;

    fn test_event() -> ResponseEvent {
        ResponseEvent {
            request_id: Some("req_1".to_string()),
            idempotency_status: None,
            method: HttpMethod::Get,
            path: "/accounts".to_string(),
            status: 200,
            request_start_time: Utc::now(),
            request_end_time: Utc::now(),
            pagination: Pagination::default(),
        }
    }

    #[test]
    fn test_api_response_derefs_to_inner() {
        #[derive(Debug, PartialEq)]
        struct Payload {
            id: &'static str,
        }

        let response = ApiResponse::new(Payload { id: "acc_1" }, test_event());
        assert_eq!(response.id, "acc_1");
        assert_eq!(response.last_response.request_id.as_deref(), Some("req_1"));
        assert_eq!(response.into_inner(), Payload { id: "acc_1" });
    }

    #[test]
    fn test_request_options_idempotency_key() {
        let opts = RequestOptions::idempotency_key("idem_1");
        assert_eq!(opts.idempotency_key.as_deref(), Some("idem_1"));
        assert!(RequestOptions::default().idempotency_key.is_none());
    }

    #[test]
    fn test_expandable_deserializes_id_and_object() {
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
        struct Record {
            id: String,
        }

        let as_id: Expandable<Record> = serde_json::from_value(serde_json::json!("acc_1")).unwrap();
        assert_eq!(as_id.id(), Some("acc_1"));
        assert!(as_id.as_expanded().is_none());

        let as_object: Expandable<Record> =
            serde_json::from_value(serde_json::json!({"id": "acc_1"})).unwrap();
        assert!(as_object.id().is_none());
        assert_eq!(as_object.as_expanded().unwrap().id, "acc_1");
    }

    #[test]
    fn test_serialize_to_query_handles_basic_types() {
        #[derive(Serialize)]
        struct Params {
            page: u32,
            status: String,
            active: bool,
        }

        let query = serialize_to_query(&Params {
            page: 2,
            status: "active".to_string(),
            active: true,
        })
        .unwrap();

        assert_eq!(query.get("page"), Some(&"2".to_string()));
        assert_eq!(query.get("status"), Some(&"active".to_string()));
        assert_eq!(query.get("active"), Some(&"true".to_string()));
    }

    #[test]
    fn test_serialize_to_query_skips_none() {
        #[derive(Serialize)]
        struct Params {
            #[serde(skip_serializing_if = "Option::is_none")]
            page: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<String>,
        }

        let query = serialize_to_query(&Params {
            page: Some(1),
            status: None,
        })
        .unwrap();

        assert_eq!(query.get("page"), Some(&"1".to_string()));
        assert!(!query.contains_key("status"));
    }

    #[test]
    fn test_serialize_to_query_joins_arrays() {
        #[derive(Serialize)]
        struct Params {
            expand: Vec<String>,
        }

        let query = serialize_to_query(&Params {
            expand: vec!["source".to_string(), "destination".to_string()],
        })
        .unwrap();

        assert_eq!(query.get("expand"), Some(&"source,destination".to_string()));
    }
}
