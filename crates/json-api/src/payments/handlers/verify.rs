//! Verify Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_app::domain::{orders::models::Order, payments::models::VerifiedPayment};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Verify Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyRequest {
    /// Gateway reference returned by initiation
    pub reference: String,
}

/// Verify Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResponse {
    /// Gateway status string, e.g. `"success"`
    pub status: String,

    /// Settled amount in base-currency units
    pub amount: u64,

    pub currency: String,

    /// The order after the verification transition
    pub order: OrderBody,
}

/// Order payload returned by verification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderBody {
    pub uuid: Uuid,
    pub order_number: String,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub total: u64,
    pub status: String,
    pub payment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_verified_at: Option<String>,
}

impl From<Order> for OrderBody {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            total: order.total,
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            payment_reference: order.payment_reference,
            payment_method: order.payment_method,
            created_at: order.created_at.to_string(),
            payment_verified_at: order
                .payment_verified_at
                .map(|timestamp| timestamp.to_string()),
        }
    }
}

impl From<VerifiedPayment> for VerifyResponse {
    fn from(verified: VerifiedPayment) -> Self {
        Self {
            status: verified.gateway_status,
            amount: verified.amount,
            currency: verified.currency,
            order: verified.order.into(),
        }
    }
}

/// Verify Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Verify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transaction verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyRequest>,
    depot: &mut Depot,
) -> Result<Json<VerifyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let reference = json.into_inner().reference;

    if reference.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Missing transaction reference"));
    }

    let verified = state
        .app
        .payments
        .verify(user, &reference)
        .await
        .map_err(into_status_error)?;

    Ok(Json(verified.into()))
}
