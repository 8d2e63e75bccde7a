//! Accounts resource.
//!
//! Accounts represent a holder's financial accounts: ACH (checking and
//! savings) and liabilities (credit cards, loans, mortgages). The
//! resource exposes the collection operations plus a per-record
//! sub-resource bundle ([`Accounts::with_id`]) scoped to
//! `accounts/{id}`: balances, card brands, payoffs, subscriptions,
//! transactions, and sensitive data.
//!
//! # Example
//!
//! ```rust,ignore
//! let account = client.accounts.retrieve("acc_1").await?;
//!
//! // Sub-resources are scoped to one account's id.
//! let balances = client.accounts.with_id("acc_1").balances.create().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, RequestOptions, Resource};

/// The kind of financial account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// A checking or savings account reachable over ACH.
    Ach,
    /// A liability: credit card, loan, or mortgage.
    Liability,
    /// An internal clearing account.
    Clearing,
}

/// ACH routing details for an account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AchDetails {
    /// The bank routing number.
    pub routing: String,
    /// The account number.
    pub number: String,
    /// `checking` or `savings`.
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Liability details for an account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiabilityDetails {
    /// The merchant the liability is held with.
    pub mch_id: String,
    /// The masked account number, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// The liability type (e.g., `credit_card`, `student_loan`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub liability_type: Option<String>,
}

/// A financial account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// The unique identifier of the account.
    pub id: String,
    /// The entity that holds this account.
    pub holder_id: String,
    /// The account's lifecycle status (e.g., `active`, `disabled`).
    pub status: String,
    /// The kind of account.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// ACH details, present for `ach` accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach: Option<AchDetails>,
    /// Liability details, present for `liability` accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liability: Option<LiabilityDetails>,
    /// Capabilities enabled for this account (e.g., `payments:receive`).
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// When the account was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the account was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating an account.
///
/// Exactly one of `ach` / `liability` is expected by the API; the SDK
/// passes the body through as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountCreateRequest {
    /// The entity that will hold the account.
    pub holder_id: String,
    /// ACH details for an `ach` account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach: Option<AchDetails>,
    /// Liability details for a `liability` account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liability: Option<LiabilityDetails>,
}

/// Query parameters for listing accounts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountListParams {
    /// Filter by holder entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_id: Option<String>,
    /// Filter by account type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
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

/// A point-in-time balance check on an account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountBalance {
    /// The unique identifier of the balance check.
    pub id: String,
    /// The account the balance belongs to.
    pub account_id: String,
    /// The balance check status (e.g., `pending`, `completed`).
    pub status: String,
    /// The balance amount in cents, present once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// When the balance check was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Card network branding information for a liability account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountCardBrand {
    /// The account the brand information belongs to.
    pub account_id: String,
    /// The card network (e.g., `visa`, `mastercard`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// The issuing brand name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// URL of the brand artwork, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,
}

/// A payoff quote for a liability account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountPayoff {
    /// The unique identifier of the payoff quote.
    pub id: String,
    /// The account the quote belongs to.
    pub account_id: String,
    /// The quote status (e.g., `pending`, `completed`).
    pub status: String,
    /// The payoff amount in cents, present once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// The date the quote is valid until.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

/// An enrollment of an account into a recurring data product.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountSubscription {
    /// The unique identifier of the subscription.
    pub id: String,
    /// The subscribed product name (e.g., `transactions`, `update`).
    pub name: String,
    /// The subscription status (e.g., `active`, `inactive`).
    pub status: String,
    /// When the subscription was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A transaction observed on an account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountTransaction {
    /// The unique identifier of the transaction.
    pub id: String,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The transaction status.
    pub status: String,
    /// The amount in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// The merchant descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    /// When the transaction posted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sensitive account fields returned on explicit request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSensitive {
    /// The unique identifier of the sensitive-data request.
    pub id: String,
    /// The account the request belongs to.
    pub account_id: String,
    /// The unmasked account number, when disclosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// The expiration date for cards, when disclosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    /// The expiration year for cards, when disclosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
}

/// Default consent-withdrawal payload for [`Accounts::withdraw_consent`].
fn default_withdrawal() -> serde_json::Value {
    serde_json::json!({
        "type": "withdraw",
        "reason": "holder_withdrew_consent"
    })
}

/// The accounts collection, scoped to `/accounts`.
#[derive(Debug)]
pub struct Accounts {
    resource: Resource,
}

impl Accounts {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            resource: Resource::new(config.with_path("accounts")),
        }
    }

    /// Retrieves an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<Account>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists accounts matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(
        &self,
        params: Option<AccountListParams>,
    ) -> Result<ApiResponse<Vec<Account>>, HttpError> {
        self.resource.list(params).await
    }

    /// Creates an account.
    ///
    /// Supply an idempotency key via `opts` when retries are enabled and
    /// duplicate creates must be prevented.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        account: &AccountCreateRequest,
        opts: Option<RequestOptions>,
    ) -> Result<ApiResponse<Account>, HttpError> {
        self.resource.create(account, opts).await
    }

    /// Withdraws the holder's consent for an account, disabling it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn withdraw_consent(&self, id: &str) -> Result<ApiResponse<Account>, HttpError> {
        self.resource
            .create_with_sub_path(&format!("{id}/consent"), &default_withdrawal(), None)
            .await
    }

    /// Returns the sub-resource bundle scoped to `accounts/{id}`.
    ///
    /// Bundles are built fresh on every call and never cached; two calls
    /// with the same id yield distinct instances scoped to the same path.
    #[must_use]
    pub fn with_id(&self, id: &str) -> AccountSubResources {
        AccountSubResources::new(&self.resource.config().with_path(id))
    }
}

/// Sub-resources scoped to one account's id.
#[derive(Debug)]
pub struct AccountSubResources {
    /// Balance checks (`accounts/{id}/balances`).
    pub balances: AccountBalances,
    /// Card brand lookups (`accounts/{id}/card_brands`).
    pub card_brands: AccountCardBrands,
    /// Payoff quotes (`accounts/{id}/payoffs`).
    pub payoffs: AccountPayoffs,
    /// Data product subscriptions (`accounts/{id}/subscriptions`).
    pub subscriptions: AccountSubscriptions,
    /// Observed transactions (`accounts/{id}/transactions`).
    pub transactions: AccountTransactions,
    /// Sensitive data requests (`accounts/{id}/sensitive`).
    pub sensitive: AccountSensitiveData,
}

impl AccountSubResources {
    fn new(config: &Configuration) -> Self {
        Self {
            balances: AccountBalances {
                resource: Resource::new(config.with_path("balances")),
            },
            card_brands: AccountCardBrands {
                resource: Resource::new(config.with_path("card_brands")),
            },
            payoffs: AccountPayoffs {
                resource: Resource::new(config.with_path("payoffs")),
            },
            subscriptions: AccountSubscriptions {
                resource: Resource::new(config.with_path("subscriptions")),
            },
            transactions: AccountTransactions {
                resource: Resource::new(config.with_path("transactions")),
            },
            sensitive: AccountSensitiveData {
                resource: Resource::new(config.with_path("sensitive")),
            },
        }
    }
}

/// Balance checks for one account.
#[derive(Debug)]
pub struct AccountBalances {
    resource: Resource,
}

impl AccountBalances {
    /// Requests a new balance check.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(&self) -> Result<ApiResponse<AccountBalance>, HttpError> {
        self.resource.create(&serde_json::json!({}), None).await
    }

    /// Retrieves a balance check by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<AccountBalance>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists balance checks for the account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<AccountBalance>>, HttpError> {
        self.resource.list::<AccountBalance, ()>(None).await
    }
}

/// Card brand lookups for one account.
#[derive(Debug)]
pub struct AccountCardBrands {
    resource: Resource,
}

impl AccountCardBrands {
    /// Retrieves card brand information for the account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self) -> Result<ApiResponse<AccountCardBrand>, HttpError> {
        self.resource.get().await
    }
}

/// Payoff quotes for one account.
#[derive(Debug)]
pub struct AccountPayoffs {
    resource: Resource,
}

impl AccountPayoffs {
    /// Requests a new payoff quote.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(&self) -> Result<ApiResponse<AccountPayoff>, HttpError> {
        self.resource.create(&serde_json::json!({}), None).await
    }

    /// Retrieves a payoff quote by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<AccountPayoff>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists payoff quotes for the account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<AccountPayoff>>, HttpError> {
        self.resource.list::<AccountPayoff, ()>(None).await
    }
}

/// Data product subscriptions for one account.
#[derive(Debug)]
pub struct AccountSubscriptions {
    resource: Resource,
}

impl AccountSubscriptions {
    /// Enrolls the account into a data product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(&self, name: &str) -> Result<ApiResponse<AccountSubscription>, HttpError> {
        self.resource
            .create(&serde_json::json!({ "enroll": name }), None)
            .await
    }

    /// Retrieves a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<AccountSubscription>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists subscriptions for the account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<AccountSubscription>>, HttpError> {
        self.resource.list::<AccountSubscription, ()>(None).await
    }

    /// Unenrolls the account from a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse<AccountSubscription>, HttpError> {
        self.resource.delete(id).await
    }
}

/// Observed transactions for one account.
#[derive(Debug)]
pub struct AccountTransactions {
    resource: Resource,
}

impl AccountTransactions {
    /// Retrieves a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn retrieve(&self, id: &str) -> Result<ApiResponse<AccountTransaction>, HttpError> {
        self.resource.get_with_id(id).await
    }

    /// Lists transactions for the account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn list(&self) -> Result<ApiResponse<Vec<AccountTransaction>>, HttpError> {
        self.resource.list::<AccountTransaction, ()>(None).await
    }
}

/// Sensitive data requests for one account.
#[derive(Debug)]
pub struct AccountSensitiveData {
    resource: Resource,
}

impl AccountSensitiveData {
    /// Requests disclosure of the given sensitive fields.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn create(
        &self,
        fields: &[&str],
    ) -> Result<ApiResponse<AccountSensitive>, HttpError> {
        self.resource
            .create(&serde_json::json!({ "expand": fields }), None)
            .await
    }
}
