//! Order Models

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;

use crate::{auth::models::UserUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
///
/// Monetary fields hold integer base-currency units (whole naira). The
/// payment gateway works in minor units; the conversion happens at the
/// payments service boundary, never here.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,

    /// Human-readable order number assigned at checkout.
    pub order_number: String,

    /// Identity that owns this order. All mutations are scoped to it.
    pub user_uuid: UserUuid,

    pub subtotal: u64,
    pub shipping_cost: u64,
    pub total: u64,

    pub status: OrderStatus,
    pub payment_status: PaymentStatus,

    /// Opaque gateway reference, set once by payment initiation.
    pub payment_reference: Option<String>,
    pub payment_method: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub payment_verified_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatusError {
                kind: "order",
                value: other.to_string(),
            }),
        }
    }
}

/// Payment state of an order or attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownStatusError {
                kind: "payment",
                value: other.to_string(),
            }),
        }
    }
}

/// A stored status column held a value this build does not know.
#[derive(Debug, Error)]
#[error("unknown {kind} status {value:?}")]
pub struct UnknownStatusError {
    kind: &'static str,
    value: String,
}
