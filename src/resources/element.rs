//! Elements resource.
//!
//! Elements are embeddable front-end flows (e.g., account linking).
//! The server side is a single operation: exchange an entity id and an
//! element configuration for a short-lived token the front end opens
//! the flow with.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, Resource};

/// A short-lived token that opens an element flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementToken {
    /// The opaque token handed to the front-end element.
    pub element_token: String,
}

/// Request body for creating an element token.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementTokenRequest {
    /// The entity the element session acts on behalf of.
    pub entity_id: String,
    /// The element type to open (e.g., `link`).
    #[serde(rename = "type")]
    pub element_type: String,
    /// Element-specific options, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// The elements endpoint, scoped to `/elements`.
#[derive(Debug)]
pub struct Elements {
    resource: Resource,
}

impl Elements {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("elements")),
        }
    }

    /// Creates a short-lived element token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create_token(
        &self,
        request: &ElementTokenRequest,
    ) -> Result<ApiResponse<ElementToken>, HttpError> {
        self.resource.create_with_sub_path("token", request, None).await
    }
}
