//! Reports resource.
//!
//! Reports are asynchronous exports (e.g., all payments created in a
//! window). Create one, poll it until `completed`, then download its
//! content. Downloads return the full response body rather than the
//! usual `{data: T}` payload because report content is not envelope
//! shaped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, RequestOptions, Resource};

/// An asynchronous export job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// The unique identifier of the report.
    pub id: String,
    /// The report type (e.g., `payments.created.current`).
    #[serde(rename = "type")]
    pub report_type: String,
    /// The job status (e.g., `processing`, `completed`).
    pub status: String,
    /// The download URL, present once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the report was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a report.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportCreateRequest {
    /// The report type to generate.
    #[serde(rename = "type")]
    pub report_type: String,
}

/// The reports collection, scoped to `/reports`.
#[derive(Debug)]
pub struct Reports {
    resource: Resource,
}

impl Reports {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("reports")),
        }
    }

    /// Retrieves a report by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Report>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Creates a report job.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        report: &ReportCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<Report>, HttpError> {
        self.resource.create(report, opts).await
    }

    /// Downloads a completed report's content.
    ///
    /// Returns the full body as JSON, without unwrapping any envelope.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn download(&self, id: &str) -> Result<ApiResponse<serde_json::Value>, HttpError> {
        self.resource.download(id).await
    }
}
