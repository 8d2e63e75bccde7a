//! # Finbridge Rust SDK
//!
//! A typed async client for the Finbridge API: accounts, entities,
//! payments, webhooks, reports, merchants, elements, opal sessions,
//! events, health checks, and simulation endpoints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use finbridge::{Configuration, Environment, Finbridge};
//! use finbridge::resources::{PaymentCreateRequest, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::builder()
//!         .environment(Environment::Dev)
//!         .api_key(std::env::var("FINBRIDGE_API_KEY")?)
//!         .build()?;
//!     let client = Finbridge::new(&config);
//!
//!     let payment = client.payments.create(
//!         &PaymentCreateRequest {
//!             amount: 5000,
//!             source: "acc_src".to_string(),
//!             destination: "acc_dst".to_string(),
//!             description: Some("Loan pmt".to_string()),
//!             ..Default::default()
//!         },
//!         Some(RequestOptions::idempotency_key("pmt-2024-08-001")),
//!     ).await?;
//!
//!     println!("created {} ({:?})", payment.id, payment.status);
//!     println!("request id: {:?}", payment.last_response.request_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **One pipeline.** Every call flows through the same
//!   request/response pipeline: validation, the `on_request` observer,
//!   the network attempt (with retries per [`RetryPolicy`]), the
//!   `on_response` observer, and error translation.
//! - **Immutable configuration.** A [`Configuration`] is validated once
//!   at build time and never mutated; resources derive path-scoped
//!   copies from it.
//! - **Typed errors.** Structured API failures become
//!   [`ApiError`](clients::ApiError) with a taxonomy
//!   [`kind`](clients::ApiError::kind); everything else passes through
//!   as the raw transport failure.
//! - **Payload plus metadata.** Calls return
//!   [`ApiResponse<T>`](resources::ApiResponse), which dereferences to
//!   the typed payload and carries the request id, idempotency status,
//!   and pagination of the call that produced it.

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

pub use client::Finbridge;
pub use clients::{ApiError, ApiErrorKind, HttpError};
pub use config::{Configuration, ConfigurationBuilder, Environment, RetryPolicy};
pub use error::ConfigError;
