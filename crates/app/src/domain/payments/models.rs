//! Payment Models

use crate::domain::{
    events::models::{AttendeeUuid, EventUuid},
    orders::models::{Order, OrderUuid, PaymentStatus},
};

/// Minor units per base-currency unit (kobo per naira).
///
/// The gateway contract is fixed: amounts are multiplied by this on the way
/// out and divided by it on the way back.
pub const MINOR_UNITS_PER_UNIT: u64 = 100;

/// Convert a base-currency amount to gateway minor units.
///
/// `None` when the multiplication overflows.
#[must_use]
pub fn to_minor_units(amount: u64) -> Option<u64> {
    amount.checked_mul(MINOR_UNITS_PER_UNIT)
}

/// Convert a gateway minor-unit amount back to base-currency units.
#[must_use]
pub fn from_minor_units(minor: u64) -> u64 {
    minor / MINOR_UNITS_PER_UNIT
}

/// A payment initiation request, already validated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatePayment {
    pub email: String,

    /// Charge amount in base-currency units.
    pub amount: u64,

    pub currency: String,
    pub callback_url: Option<String>,
    pub target: PaymentTarget,
}

/// The single domain record set a payment is tagged to.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTarget {
    Order(OrderUuid),
    EventTickets {
        event: EventUuid,
        attendees: Vec<AttendeeUuid>,
    },
}

/// An opened gateway transaction plus the records it was attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatedPayment {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
    pub target: InitiatedTarget,
}

/// Identifiers echoed back to the caller after initiation.
///
/// For ticket batches, `attendees` holds the ids actually marked pending,
/// which may be a subset of what was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum InitiatedTarget {
    Order(OrderUuid),
    EventTickets {
        event: EventUuid,
        attendees: Vec<AttendeeUuid>,
    },
}

/// Outcome of verifying a gateway transaction.
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    pub payment_status: PaymentStatus,

    /// Raw status string the gateway reported.
    pub gateway_status: String,

    /// Settled amount converted back to base-currency units.
    pub amount: u64,

    pub currency: String,
    pub order: Order,
}
