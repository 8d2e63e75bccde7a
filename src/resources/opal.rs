//! Opal resource.
//!
//! Opal sessions are hosted data-sharing sessions a holder completes in
//! the browser. The SDK side is thin: create a session, retrieve it,
//! list them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, RequestOptions, Resource};

/// A hosted data-sharing session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OpalSession {
    /// The unique identifier of the session.
    pub id: String,
    /// The entity the session belongs to.
    pub entity_id: String,
    /// The session status (e.g., `pending`, `completed`).
    pub status: String,
    /// The hosted URL the holder completes the session at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the session was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a session.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpalCreateRequest {
    /// The entity to open the session for.
    pub entity_id: String,
}

/// The opal sessions collection, scoped to `/opal`.
#[derive(Debug)]
pub struct Opal {
    resource: Resource,
}

impl Opal {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("opal")),
        }
    }

    /// Retrieves a session by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<OpalSession>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists sessions.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<OpalSession>>, HttpError> {
        self.resource.list::<OpalSession, ()>(None).await
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        request: &OpalCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<OpalSession>, HttpError> {
        self.resource.create(request, opts).await
    }
}
