//! Health check resource.
//!
//! `GET /` reports API liveness. Unlike every other endpoint, the body
//! is not `{data: T}` shaped, so the full body is deserialized directly.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, Resource};

/// The liveness body returned by `GET /`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthCheckResponse {
    /// Diagnostic payload, when the API includes one.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Whether the API considers itself healthy.
    pub success: bool,
    /// A human-readable status message.
    pub message: String,
}

/// The health check endpoint, bound to the API root.
#[derive(Debug)]
pub struct HealthCheck {
    resource: Resource,
}

impl HealthCheck {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.clone()),
        }
    }

    /// Checks API liveness.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self) -> Result<ApiResponse<HealthCheckResponse>, HttpError> {
        self.resource.get_raw().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_deserializes_without_envelope() {
        let body: HealthCheckResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "pong"
        }))
        .unwrap();
        assert!(body.success);
        assert_eq!(body.message, "pong");
        assert!(body.data.is_none());
    }
}
