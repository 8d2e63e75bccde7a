//! Events resource.
//!
//! Events record every state change across a team's records and back
//! the webhook deliveries. The log is read only; the changed record is
//! carried verbatim as `data` since its shape depends on the event type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, Resource};

/// A recorded state change.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiEvent {
    /// The unique identifier of the event.
    pub id: String,
    /// The event type (e.g., `payment.update`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// The id of the record that changed.
    pub resource_id: String,
    /// The kind of record that changed (e.g., `payment`).
    pub resource_type: String,
    /// A snapshot of the changed record, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Field-level changes, when the API provides them.
    #[serde(default)]
    pub diff: Option<serde_json::Value>,
    /// When the event was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing events.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEventListParams {
    /// Filter by event type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Filter by changed record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
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

/// The event log, scoped to `/events`.
#[derive(Debug)]
pub struct Events {
    resource: Resource,
}

impl Events {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("events")),
        }
    }

    /// Retrieves an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<ApiEvent>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists events matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(
        &self,
        params: Option<ApiEventListParams>,
    ) -> Result<ApiResponse<Vec<ApiEvent>>, HttpError> {
        self.resource.list(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_carries_snapshot_verbatim() {
        let event: ApiEvent = serde_json::from_value(serde_json::json!({
            "id": "evt_1",
            "type": "payment.update",
            "resource_id": "pmt_1",
            "resource_type": "payment",
            "data": {"id": "pmt_1", "status": "sent", "unmodeled_field": true}
        }))
        .unwrap();

        assert_eq!(event.event_type, "payment.update");
        assert_eq!(event.data.unwrap()["unmodeled_field"], true);
    }
}
