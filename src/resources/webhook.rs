//! Webhooks resource.
//!
//! Webhooks register a URL to be notified when records of a given type
//! change. The optional `auth_token` is echoed back on deliveries so the
//! receiver can authenticate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, RequestOptions, Resource};

/// A registered webhook endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Webhook {
    /// The unique identifier of the webhook.
    pub id: String,
    /// The event type the webhook subscribes to (e.g., `payment.update`).
    #[serde(rename = "type")]
    pub webhook_type: String,
    /// The URL deliveries are POSTed to.
    pub url: String,
    /// When the webhook was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the webhook was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for registering a webhook.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookCreateRequest {
    /// The event type to subscribe to.
    #[serde(rename = "type")]
    pub webhook_type: String,
    /// The URL to deliver events to.
    pub url: String,
    /// Token echoed back in the `Authorization` header of deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

/// The webhooks collection, scoped to `/webhooks`.
#[derive(Debug)]
pub struct Webhooks {
    resource: Resource,
}

impl Webhooks {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("webhooks")),
        }
    }

    /// Retrieves a webhook by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Webhook>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists all registered webhooks.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<Webhook>>, HttpError> {
        self.resource.list::<Webhook, ()>(None).await
    }

    /// Registers a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        webhook: &WebhookCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<Webhook>, HttpError> {
        self.resource.create(webhook, opts).await
    }

    /// Deletes a webhook, stopping deliveries.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse<Webhook>, HttpError> {
        self.resource.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_type_field_renames() {
        let webhook: Webhook = serde_json::from_value(serde_json::json!({
            "id": "whk_1",
            "type": "payment.update",
            "url": "https://example.org/hooks"
        }))
        .unwrap();
        assert_eq!(webhook.webhook_type, "payment.update");

        let body = serde_json::to_value(WebhookCreateRequest {
            webhook_type: "account.create".to_string(),
            url: "https://example.org/hooks".to_string(),
            auth_token: None,
        })
        .unwrap();
        assert_eq!(body["type"], "account.create");
        assert!(body.get("auth_token").is_none());
    }
}
