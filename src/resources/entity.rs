//! Entities resource.
//!
//! Entities are the legal persons (individuals or corporations) that
//! hold accounts. The resource exposes the collection operations plus a
//! per-record sub-resource bundle ([`Entities::with_id`]) scoped to
//! `entities/{id}`: connect sessions and identity verification sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use finbridge::resources::{EntityCreateRequest, EntityIndividual, EntityType};
//!
//! let entity = client.entities.create(
//!     &EntityCreateRequest {
//!         entity_type: EntityType::Individual,
//!         individual: Some(EntityIndividual {
//!             first_name: Some("Kevin".to_string()),
//!             last_name: Some("Doyle".to_string()),
//!             phone: Some("+15121231111".to_string()),
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     },
//!     None,
//! ).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, RequestOptions, Resource};

/// The legal form of an entity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A natural person.
    Individual,
    /// A corporation or other legal organization.
    Corporation,
}

/// Identity attributes of an individual entity.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityIndividual {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number in E.164 format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

/// A legal person that holds accounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// The unique identifier of the entity.
    pub id: String,
    /// The legal form of the entity.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// The entity's lifecycle status (e.g., `active`, `incomplete`).
    pub status: String,
    /// Individual attributes, present for `individual` entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<EntityIndividual>,
    /// Capabilities enabled for this entity.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// When the entity was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the entity was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating an entity.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityCreateRequest {
    /// The legal form of the entity to create.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    /// Individual attributes for an `individual` entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<EntityIndividual>,
    /// Arbitrary key-value metadata stored on the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Request body for updating an entity. Only set fields are sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityUpdateRequest {
    /// Replacement individual attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<EntityIndividual>,
    /// Replacement metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for listing entities.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityListParams {
    /// Filter by entity type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    /// Filter by status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
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

/// A session linking external accounts to an entity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntityConnect {
    /// The unique identifier of the connect session.
    pub id: String,
    /// The entity the session belongs to.
    pub entity_id: String,
    /// The session status (e.g., `pending`, `completed`).
    pub status: String,
    /// Ids of the accounts discovered by the session.
    #[serde(default)]
    pub accounts: Vec<String>,
    /// When the session was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An identity verification session for an entity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntityVerificationSession {
    /// The unique identifier of the verification session.
    pub id: String,
    /// The entity the session belongs to.
    pub entity_id: String,
    /// The verification method (e.g., `sms`, `kba`).
    #[serde(rename = "type")]
    pub session_type: String,
    /// The session status (e.g., `pending`, `verified`, `failed`).
    pub status: String,
    /// Method-specific session detail, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// The entities collection, scoped to `/entities`.
#[derive(Debug)]
pub struct Entities {
    resource: Resource,
}

impl Entities {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("entities")),
        }
    }

    /// Retrieves an entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Entity>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists entities matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(
        &self,
        params: Option<EntityListParams>,
    ) -> Result<ApiResponse<Vec<Entity>>, HttpError> {
        self.resource.list(params).await
    }

    /// Creates an entity.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        entity: &EntityCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<Entity>, HttpError> {
        self.resource.create(entity, opts).await
    }

    /// Updates an entity. Only fields set on `update` are changed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn update(
        &self,
        id: &str,
        update: &EntityUpdateRequest,
    ) -> Result<ApiResponse<Entity>, HttpError> {
        self.resource.update_with_id(id, update).await
    }

    /// Withdraws the entity's consent, disabling it and its accounts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn withdraw_consent(&self, id: &str) -> Result<ApiResponse<Entity>, HttpError> {
        let body = serde_json::json!({
            "type": "withdraw",
            "reason": "entity_withdrew_consent"
        });
        self.resource
            .create_with_sub_path(&format!("{id}/consent"), &body, None)
            .await
    }

    /// Returns the sub-resource bundle scoped to `entities/{id}`.
    ///
    /// Bundles are built fresh on every call and never cached.
    #[must_use]
    pub fn with_id(&self, id: &str) -> EntitySubResources {
        EntitySubResources::new(&self.resource.config().with_path(id))
    }
}

/// Sub-resources scoped to one entity's id.
#[derive(Debug)]
pub struct EntitySubResources {
    /// External account linking sessions (`entities/{id}/connect`).
    pub connect: EntityConnects,
    /// Identity verification sessions
    /// (`entities/{id}/verification_sessions`).
    pub verification_sessions: EntityVerificationSessions,
}

impl EntitySubResources {
    fn new(config: &Configuration) -> Self {
        Self {
            connect: EntityConnects {
                resource: Resource::new(config.with_path("connect")),
            },
            verification_sessions: EntityVerificationSessions {
                resource: Resource::new(config.with_path("verification_sessions")),
            },
        }
    }
}

/// Connect sessions for one entity.
#[derive(Debug)]
pub struct EntityConnects {
    resource: Resource,
}

impl EntityConnects {
    /// Starts a new connect session for the entity.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(&self) -> Result<ApiResponse<EntityConnect>, HttpError> {
        self.resource.create(&serde_json::json!({}), None).await
    }

    /// Retrieves a connect session by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<EntityConnect>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists connect sessions for the entity.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<EntityConnect>>, HttpError> {
        self.resource.list::<EntityConnect, ()>(None).await
    }
}

/// Identity verification sessions for one entity.
#[derive(Debug)]
pub struct EntityVerificationSessions {
    resource: Resource,
}

impl EntityVerificationSessions {
    /// Starts a verification session of the given method.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        session_type: &str,
    ) -> Result<ApiResponse<EntityVerificationSession>, HttpError> {
        self.resource
            .create(&serde_json::json!({ "type": session_type }), None)
            .await
    }

    /// Submits an answer or token to advance a pending session.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn update(
        &self,
        id: &str,
        detail: &serde_json::Value,
    ) -> Result<ApiResponse<EntityVerificationSession>, HttpError> {
        self.resource.update_with_id(id, detail).await
    }

    /// Retrieves a verification session by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(
        &self,
        id: &str,
    ) -> Result<ApiResponse<EntityVerificationSession>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists verification sessions for the entity.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<EntityVerificationSession>>, HttpError> {
        self.resource
            .list::<EntityVerificationSession, ()>(None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn dev_config() -> Configuration {
        Configuration::builder()
            .environment(Environment::Dev)
            .api_key("sk_test_key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_entity_deserializes_with_type_rename() {
        let entity: Entity = serde_json::from_value(serde_json::json!({
            "id": "ent_1",
            "type": "individual",
            "status": "active",
            "individual": {"first_name": "Kevin", "last_name": "Doyle"}
        }))
        .unwrap();

        assert_eq!(entity.entity_type, EntityType::Individual);
        assert_eq!(
            entity.individual.unwrap().first_name.as_deref(),
            Some("Kevin")
        );
        assert!(entity.capabilities.is_empty());
    }

    #[test]
    fn test_create_request_skips_unset_fields() {
        let body = serde_json::to_value(EntityCreateRequest {
            entity_type: Some(EntityType::Corporation),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(body["type"], "corporation");
        assert!(body.get("individual").is_none());
        assert!(body.get("metadata").is_none());
    }

    #[test]
    fn test_with_id_scopes_both_sub_resources() {
        let entities = Entities::new(&dev_config());
        let bundle = entities.with_id("ent_1");
        let debug = format!("{bundle:?}");
        assert!(debug.contains("entities/ent_1/connect"));
        assert!(debug.contains("entities/ent_1/verification_sessions"));
    }
}
