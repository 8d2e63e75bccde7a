//! Top-level Finbridge client.

use crate::config::Configuration;
use crate::resources::{
    Accounts, Elements, Entities, Events, HealthCheck, Merchants, Opal, Payments, Reports,
    Simulate, Webhooks,
};

/// Entry point to the Finbridge API.
///
/// Built from a validated [`Configuration`]; each field is a resource
/// scoped to its own URL segment, sharing the configuration's
/// credentials, observers, and retry policy.
///
/// # Example
///
/// ```rust,ignore
/// use finbridge::{Configuration, Environment, Finbridge};
///
/// let config = Configuration::builder()
///     .environment(Environment::Dev)
///     .api_key("sk_test_key")
///     .build()?;
/// let client = Finbridge::new(&config);
///
/// let ping = client.healthcheck.retrieve().await?;
/// assert!(ping.success);
/// ```
#[derive(Debug)]
pub struct Finbridge {
    /// Financial accounts (`/accounts`).
    pub accounts: Accounts,
    /// Legal persons that hold accounts (`/entities`).
    pub entities: Entities,
    /// Fund transfers between accounts (`/payments`).
    pub payments: Payments,
    /// Webhook registrations (`/webhooks`).
    pub webhooks: Webhooks,
    /// Asynchronous exports (`/reports`).
    pub reports: Reports,
    /// The liability provider catalog (`/merchants`).
    pub merchants: Merchants,
    /// Element token exchange (`/elements`).
    pub elements: Elements,
    /// Hosted data-sharing sessions (`/opal`).
    pub opal: Opal,
    /// The state-change log (`/events`).
    pub events: Events,
    /// API liveness (`GET /` on the base URL).
    pub healthcheck: HealthCheck,
    /// Non-production state transitions (`/simulate`).
    pub simulate: Simulate,
}

impl Finbridge {
    /// Creates a client with every resource scoped from `config`.
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        Self {
            accounts: Accounts::new(config),
            entities: Entities::new(config),
            payments: Payments::new(config),
            webhooks: Webhooks::new(config),
            reports: Reports::new(config),
            merchants: Merchants::new(config),
            elements: Elements::new(config),
            opal: Opal::new(config),
            events: Events::new(config),
            healthcheck: HealthCheck::new(config),
            simulate: Simulate::new(config),
        }
    }
}

// Verify Finbridge is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Finbridge>();
};
