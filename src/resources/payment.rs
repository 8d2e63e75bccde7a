//! Payments resource.
//!
//! Payments move funds from a source account to a destination account.
//! Both endpoints are [`Expandable`]: by default they deserialize as
//! opaque account ids, and as full [`Account`] records when the call
//! requested expansion.
//!
//! # Example
//!
//! ```rust,ignore
//! use finbridge::resources::{PaymentCreateRequest, RequestOptions};
//!
//! let payment = client.payments.create(
//!     &PaymentCreateRequest {
//!         amount: 5000,
//!         source: "acc_src".to_string(),
//!         destination: "acc_dst".to_string(),
//!         description: Some("Loan pmt".to_string()),
//!         ..Default::default()
//!     },
//!     Some(RequestOptions::idempotency_key("pmt-2024-08-001")),
//! ).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{Account, ApiResponse, Expandable, RequestOptions, Resource};

/// The lifecycle status of a payment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Accepted, not yet submitted to the network.
    Pending,
    /// Submitted to the payment network.
    Processing,
    /// Funds delivered to the destination.
    Sent,
    /// Returned by the receiving institution.
    Returned,
    /// Canceled before submission.
    Canceled,
    /// Reversed after delivery.
    Reversed,
    /// Failed before delivery.
    Failed,
}

/// A transfer of funds between two accounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    /// The unique identifier of the payment.
    pub id: String,
    /// The amount in cents.
    pub amount: i64,
    /// The funding account: an id, or the expanded record.
    pub source: Expandable<Account>,
    /// The receiving account: an id, or the expanded record.
    pub destination: Expandable<Account>,
    /// The lifecycle status.
    pub status: PaymentStatus,
    /// The statement descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The reason for the current status, when the API provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Arbitrary key-value metadata stored on the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// The date the payment is estimated to complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion_date: Option<String>,
    /// When the payment was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the payment was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a payment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCreateRequest {
    /// The amount in cents.
    pub amount: i64,
    /// The funding account id.
    pub source: String,
    /// The receiving account id.
    pub destination: String,
    /// The statement descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arbitrary key-value metadata to store on the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for listing payments.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentListParams {
    /// Filter by funding account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Filter by receiving account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Filter by status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Related fields to expand (e.g., `source`, `destination`).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub expand: Vec<String>,
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
    /// Cursor from a previous page's `page_cursor_next`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cursor: Option<String>,
}

/// A reversal of a delivered payment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentReversal {
    /// The unique identifier of the reversal.
    pub id: String,
    /// The payment being reversed.
    pub pmt_id: String,
    /// The reversal status (e.g., `pending_approval`, `processing`,
    /// `completed`, `failed`).
    pub status: String,
    /// The stated reason for the reversal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the reversal was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for advancing a reversal's status.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentReversalUpdate {
    /// The target status (e.g., `pending` to approve).
    pub status: String,
}

/// The payments collection, scoped to `/payments`.
#[derive(Debug)]
pub struct Payments {
    resource: Resource,
}

impl Payments {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("payments")),
        }
    }

    /// Retrieves a payment by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Payment>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists payments matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(
        &self,
        params: Option<PaymentListParams>,
    ) -> Result<ApiResponse<Vec<Payment>>, HttpError> {
        self.resource.list(params).await
    }

    /// Creates a payment.
    ///
    /// Pass an idempotency key via `opts` whenever retries are enabled;
    /// a retried create without one can move funds twice.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        payment: &PaymentCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<Payment>, HttpError> {
        self.resource.create(payment, opts).await
    }

    /// Cancels a pending payment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse<Payment>, HttpError> {
        self.resource.delete(id).await
    }

    /// Returns the sub-resource bundle scoped to `payments/{id}`.
    ///
    /// Bundles are built fresh on every call and never cached.
    #[must_use]
    pub fn with_id(&self, id: &str) -> PaymentSubResources {
        PaymentSubResources::new(&self.resource.config().with_path(id))
    }
}

/// Sub-resources scoped to one payment's id.
#[derive(Debug)]
pub struct PaymentSubResources {
    /// Reversals of the payment (`payments/{id}/reversals`).
    pub reversals: PaymentReversals,
}

impl PaymentSubResources {
    fn new(config: &Configuration) -> Self {
        Self {
            reversals: PaymentReversals {
                resource: Resource::new(config.with_path("reversals")),
            },
        }
    }
}

/// Reversals for one payment.
#[derive(Debug)]
pub struct PaymentReversals {
    resource: Resource,
}

impl PaymentReversals {
    /// Retrieves a reversal by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<PaymentReversal>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists reversals for the payment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<PaymentReversal>>, HttpError> {
        self.resource.list::<PaymentReversal, ()>(None).await
    }

    /// Advances a reversal's status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn update(
        &self,
        id: &str,
        update: &PaymentReversalUpdate,
    ) -> Result<ApiResponse<PaymentReversal>, HttpError> {
        self.resource.update_with_id(id, update).await
    }
}
