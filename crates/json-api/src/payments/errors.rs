//! Errors

use salvo::http::StatusError;
use souk_app::{domain::payments::PaymentsServiceError, gateway::GatewayError};
use tracing::error;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Amount is too large")
        }
        PaymentsServiceError::OrderNotFound => {
            StatusError::bad_request().brief("Order not found for this payment")
        }
        PaymentsServiceError::Gateway(GatewayError::Declined(message)) => {
            StatusError::bad_request().brief(message)
        }
        PaymentsServiceError::Gateway(source) => {
            error!("payment gateway request failed: {source}");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::Orders(source) => {
            error!("failed to update order payment state: {source}");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::Attendees(source) => {
            error!("failed to update attendee payment state: {source}");

            StatusError::internal_server_error()
        }
    }
}
