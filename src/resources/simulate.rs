//! Simulate resource.
//!
//! Simulation endpoints drive record state transitions in non-production
//! environments, where real processors never advance them. Only payment
//! simulation is currently exposed, under `/simulate/payments`.
//!
//! # Example
//!
//! ```rust,ignore
//! use finbridge::resources::SimulatePaymentUpdate;
//!
//! client.simulate.payments.update("pmt_1", &SimulatePaymentUpdate {
//!     status: "processing".to_string(),
//! }).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::config::Configuration;
use crate::resources::{ApiResponse, Payment, Resource};

/// Request body for forcing a payment status transition.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulatePaymentUpdate {
    /// The status to force the payment into.
    pub status: String,
}

/// The simulation namespace, scoped to `/simulate`.
#[derive(Debug)]
pub struct Simulate {
    /// Payment simulation endpoints (`simulate/payments`).
    pub payments: SimulatePayments,
}

impl Simulate {
    pub(crate) fn new(config: &Configuration) -> Self {
        let scoped = config.with_path("simulate");
        Self {
            payments: SimulatePayments {
                resource: Resource::new(scoped.with_path("payments")),
            },
        }
    }
}

/// Payment simulation endpoints.
#[derive(Debug)]
pub struct SimulatePayments {
    resource: Resource,
}

impl SimulatePayments {
    /// Forces a payment into the given status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures or structured API errors.
    pub async fn update(
        &self,
        id: &str,
        update: &SimulatePaymentUpdate,
    ) -> Result<ApiResponse<Payment>, HttpError> {
        self.resource.post_with_id(id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn test_namespace_scopes_to_simulate_payments() {
        let config = Configuration::builder()
            .environment(Environment::Dev)
            .api_key("sk_test_key")
            .build()
            .unwrap();
        let simulate = Simulate::new(&config);
        assert!(format!("{simulate:?}").contains("dev.finbridge.com/simulate/payments"));
    }
}
