//! Event Models

use jiff::Timestamp;

use crate::{auth::models::UserUuid, domain::orders::models::PaymentStatus, uuids::TypedUuid};

/// Event UUID
pub type EventUuid = TypedUuid<Event>;

/// Event Model
#[derive(Debug, Clone)]
pub struct Event {
    pub uuid: EventUuid,
    pub name: String,

    /// Per-ticket price in base-currency units.
    pub ticket_price: u64,

    pub starts_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Attendee UUID
pub type AttendeeUuid = TypedUuid<Attendee>;

/// Attendee Model
///
/// A lightweight order-like row. One gateway transaction may cover several
/// attendees; each row tracks its payment state independently.
#[derive(Debug, Clone)]
pub struct Attendee {
    pub uuid: AttendeeUuid,
    pub event_uuid: EventUuid,
    pub user_uuid: UserUuid,
    pub payment_status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
