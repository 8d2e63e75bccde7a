//! Merchants resource.
//!
//! Merchants are the liability providers (card issuers, loan servicers)
//! payments can be directed to. The catalog is read only.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, Resource};

/// A liability provider in the merchant catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Merchant {
    /// The unique identifier of the merchant (`mch_` prefixed).
    pub mch_id: String,
    /// The merchant's display name.
    pub name: String,
    /// Merchant categories (e.g., `credit_card`, `student_loan`).
    #[serde(default)]
    pub types: Vec<String>,
    /// Alternative names the merchant is known by.
    #[serde(default)]
    pub account_prefixes: Vec<String>,
    /// Provider-specific identifiers (e.g., Plaid institution ids).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_ids: Option<serde_json::Value>,
    /// URL of the merchant's logo, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Query parameters for searching the merchant catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MerchantListParams {
    /// Filter by merchant name substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Filter by category.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub merchant_type: Option<String>,
    /// Filter by a provider-specific id (e.g., `provider_id.plaid`).
    #[serde(rename = "provider_id.plaid", skip_serializing_if = "Option::is_none")]
    pub provider_id_plaid: Option<String>,
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
}

/// The merchants catalog, scoped to `/merchants`.
#[derive(Debug)]
pub struct Merchants {
    resource: Resource,
}

impl Merchants {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("merchants")),
        }
    }

    /// Retrieves a merchant by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Merchant>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Searches the merchant catalog.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(
        &self,
        params: Option<MerchantListParams>,
    ) -> Result<ApiResponse<Vec<Merchant>>, HttpError> {
        self.resource.list(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_collections_default_empty() {
        let merchant: Merchant = serde_json::from_value(serde_json::json!({
            "mch_id": "mch_1",
            "name": "Example Bank"
        }))
        .unwrap();
        assert!(merchant.types.is_empty());
        assert!(merchant.account_prefixes.is_empty());
    }

    #[test]
    fn test_list_params_provider_id_rename() {
        let value = serde_json::to_value(MerchantListParams {
            provider_id_plaid: Some("ins_12345".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["provider_id.plaid"], "ins_12345");
        assert!(value.get("name").is_none());
    }
}
