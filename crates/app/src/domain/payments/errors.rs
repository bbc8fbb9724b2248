//! Payments service errors.

use thiserror::Error;

use crate::{
    domain::{events::AttendeesRepositoryError, orders::OrdersRepositoryError},
    gateway::GatewayError,
};

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    /// The amount cannot be represented in gateway minor units.
    #[error("amount is too large")]
    AmountOverflow,

    /// No order matched the target id (or the stored reference) for the
    /// calling identity.
    #[error("order not found")]
    OrderNotFound,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("order storage error")]
    Orders(#[source] OrdersRepositoryError),

    #[error("attendee storage error")]
    Attendees(#[from] AttendeesRepositoryError),
}

impl From<OrdersRepositoryError> for PaymentsServiceError {
    fn from(error: OrdersRepositoryError) -> Self {
        match error {
            OrdersRepositoryError::NotFound => Self::OrderNotFound,
            other => Self::Orders(other),
        }
    }
}
