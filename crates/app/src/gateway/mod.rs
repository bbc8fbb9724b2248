//! Payment gateway interface.
//!
//! The rest of the crate only ever sees this narrow trait; the production
//! implementation lives in [`paystack`]. All amounts crossing this boundary
//! are gateway minor units.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use thiserror::Error;

pub mod paystack;

pub use paystack::{PaystackClient, PaystackConfig};

/// Gateway status string reported for a settled, successful transaction.
pub const TRANSACTION_SUCCESS: &str = "success";

/// Request to open a gateway transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeTransaction {
    pub email: String,

    /// Charge amount in minor units (kobo).
    pub amount_minor: u64,

    pub currency: String,
    pub callback_url: Option<String>,

    /// Opaque correlation data echoed back by gateway notifications.
    pub metadata: Value,
}

/// A freshly opened gateway transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayAuthorization {
    /// URL the payer is redirected to.
    pub authorization_url: String,

    pub access_code: String,

    /// Unique reference identifying this transaction attempt.
    pub reference: String,
}

/// The gateway's view of a transaction, as returned by verification.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayTransaction {
    /// Gateway status string; [`TRANSACTION_SUCCESS`] means settled.
    pub status: String,

    /// Settled amount in minor units.
    pub amount_minor: u64,

    pub currency: String,
}

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway processed the request and rejected it.
    #[error("{0}")]
    Declined(String),

    /// The gateway returned a body this client does not understand.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a transaction and obtain the payer authorization details.
    async fn initialize_transaction(
        &self,
        request: InitializeTransaction,
    ) -> Result<GatewayAuthorization, GatewayError>;

    /// Fetch the settled state of a transaction by its reference.
    async fn verify_transaction(&self, reference: &str)
    -> Result<GatewayTransaction, GatewayError>;
}
