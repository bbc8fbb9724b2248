//! Payments service.
//!
//! Drives the order payment state machine: `initiate` opens a gateway
//! transaction and tags it to an order or attendee batch; `verify` settles
//! the owning order's `payment_status`/`status` pair from the gateway's
//! answer. The gateway call and the local row update are not wrapped in a
//! transaction; a failure between the two is logged and surfaced, never
//! auto-reconciled.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::{Value, json};
use tracing::warn;

use crate::{
    auth::models::UserUuid,
    domain::{
        events::repository::AttendeesRepository,
        orders::{
            models::{OrderStatus, PaymentStatus},
            repository::OrdersRepository,
        },
        payments::{
            errors::PaymentsServiceError,
            models::{
                InitiatePayment, InitiatedPayment, InitiatedTarget, PaymentTarget, VerifiedPayment,
                from_minor_units, to_minor_units,
            },
        },
    },
    gateway::{InitializeTransaction, PaymentGateway, TRANSACTION_SUCCESS},
};

/// Identifier stored in `orders.payment_method` for gateway transactions.
pub const PAYMENT_METHOD: &str = "paystack";

#[derive(Clone)]
pub struct PgPaymentsService {
    orders: Arc<dyn OrdersRepository>,
    attendees: Arc<dyn AttendeesRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        attendees: Arc<dyn AttendeesRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            orders,
            attendees,
            gateway,
        }
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn initiate(
        &self,
        user: UserUuid,
        request: InitiatePayment,
    ) -> Result<InitiatedPayment, PaymentsServiceError> {
        let amount_minor =
            to_minor_units(request.amount).ok_or(PaymentsServiceError::AmountOverflow)?;

        let authorization = self
            .gateway
            .initialize_transaction(InitializeTransaction {
                email: request.email,
                amount_minor,
                currency: request.currency,
                callback_url: request.callback_url,
                metadata: target_metadata(user, &request.target),
            })
            .await?;

        let target = match request.target {
            PaymentTarget::Order(order) => {
                let updated = self
                    .orders
                    .attach_payment(user, order, &authorization.reference, PAYMENT_METHOD)
                    .await;

                match updated {
                    Ok(order) => InitiatedTarget::Order(order.uuid),
                    Err(error) => {
                        warn!(
                            reference = %authorization.reference,
                            order_uuid = %order,
                            %error,
                            "gateway transaction opened but the order update failed; the transaction is orphaned"
                        );

                        return Err(error.into());
                    }
                }
            }
            PaymentTarget::EventTickets { event, attendees } => {
                let updated = self
                    .attendees
                    .mark_payment_pending(user, event, &attendees)
                    .await?;

                if updated.len() != attendees.len() {
                    warn!(
                        reference = %authorization.reference,
                        event_uuid = %event,
                        requested = attendees.len(),
                        updated = updated.len(),
                        "attendee batch partially updated; ids not owned by the caller were skipped"
                    );
                }

                InitiatedTarget::EventTickets {
                    event,
                    attendees: updated,
                }
            }
        };

        Ok(InitiatedPayment {
            authorization_url: authorization.authorization_url,
            access_code: authorization.access_code,
            reference: authorization.reference,
            target,
        })
    }

    async fn verify(
        &self,
        user: UserUuid,
        reference: &str,
    ) -> Result<VerifiedPayment, PaymentsServiceError> {
        let transaction = self.gateway.verify_transaction(reference).await?;

        let payment_status = if transaction.status == TRANSACTION_SUCCESS {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Failed
        };

        let status = match payment_status {
            PaymentStatus::Paid => OrderStatus::Confirmed,
            _ => OrderStatus::Cancelled,
        };

        let recorded = self
            .orders
            .record_verification(user, reference, payment_status, status, Timestamp::now())
            .await;

        let order = match recorded {
            Ok(order) => order,
            Err(error) => {
                warn!(
                    reference = %reference,
                    %error,
                    "gateway transaction verified but no order could be updated"
                );

                return Err(error.into());
            }
        };

        Ok(VerifiedPayment {
            payment_status,
            gateway_status: transaction.status,
            amount: from_minor_units(transaction.amount_minor),
            currency: transaction.currency,
            order,
        })
    }
}

/// Correlation metadata sent with the gateway transaction so downstream
/// notifications can be traced back to the identity and target records.
fn target_metadata(user: UserUuid, target: &PaymentTarget) -> Value {
    match target {
        PaymentTarget::Order(order) => json!({
            "user_uuid": user.into_uuid(),
            "order_uuid": order.into_uuid(),
        }),
        PaymentTarget::EventTickets { event, attendees } => json!({
            "user_uuid": user.into_uuid(),
            "event_uuid": event.into_uuid(),
            "attendee_uuids": attendees
                .iter()
                .map(|attendee| attendee.into_uuid())
                .collect::<Vec<_>>(),
        }),
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open a gateway transaction for the given target and tag the target's
    /// rows with the new reference.
    async fn initiate(
        &self,
        user: UserUuid,
        request: InitiatePayment,
    ) -> Result<InitiatedPayment, PaymentsServiceError>;

    /// Settle an order from the gateway's verdict on `reference`.
    async fn verify(
        &self,
        user: UserUuid,
        reference: &str,
    ) -> Result<VerifiedPayment, PaymentsServiceError>;
}
