//! Initiate Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_app::domain::{
    events::models::{AttendeeUuid, EventUuid},
    orders::models::OrderUuid,
    payments::models::{InitiatePayment, InitiatedPayment, InitiatedTarget, PaymentTarget},
};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

fn default_currency() -> String {
    "NGN".to_string()
}

/// Initiate Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InitiateRequest {
    /// Payer email forwarded to the gateway
    pub email: String,

    /// Charge amount in base-currency units
    pub amount: u64,

    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// URL the gateway redirects to after payment
    #[serde(default)]
    pub callback_url: Option<String>,

    /// The order or event-ticket batch this payment settles
    pub metadata: PaymentMetadata,
}

/// Payment target metadata; exactly one target must be present.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_ids: Option<Vec<Uuid>>,
}

impl PaymentMetadata {
    fn into_target(self) -> Result<PaymentTarget, StatusError> {
        match (self.order_id, self.event_id) {
            (Some(order), None) => Ok(PaymentTarget::Order(OrderUuid::from_uuid(order))),
            (None, Some(event)) => Ok(PaymentTarget::EventTickets {
                event: EventUuid::from_uuid(event),
                attendees: self
                    .attendee_ids
                    .unwrap_or_default()
                    .into_iter()
                    .map(AttendeeUuid::from_uuid)
                    .collect(),
            }),
            (Some(_), Some(_)) => Err(StatusError::bad_request()
                .brief("Payment metadata must identify a single target")),
            (None, None) => Err(StatusError::bad_request()
                .brief("Payment metadata must reference an order or an event ticket batch")),
        }
    }
}

/// Payment Initiated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InitiateResponse {
    /// URL to redirect the payer to
    pub authorization_url: String,

    pub access_code: String,

    /// Gateway reference for later verification
    pub reference: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,

    /// Attendee ids actually marked pending; may be a subset of the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_ids: Option<Vec<Uuid>>,
}

impl From<InitiatedPayment> for InitiateResponse {
    fn from(initiated: InitiatedPayment) -> Self {
        let mut response = Self {
            authorization_url: initiated.authorization_url,
            access_code: initiated.access_code,
            reference: initiated.reference,
            order_id: None,
            event_id: None,
            attendee_ids: None,
        };

        match initiated.target {
            InitiatedTarget::Order(order) => {
                response.order_id = Some(order.into_uuid());
            }
            InitiatedTarget::EventTickets { event, attendees } => {
                response.event_id = Some(event.into_uuid());
                response.attendee_ids = Some(
                    attendees
                        .into_iter()
                        .map(AttendeeUuid::into_uuid)
                        .collect(),
                );
            }
        }

        response
    }
}

/// Initiate Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Initiate Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gateway transaction opened"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<InitiateRequest>,
    depot: &mut Depot,
) -> Result<Json<InitiateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = json.into_inner();
    let target = request.metadata.into_target()?;

    let initiated = state
        .app
        .payments
        .initiate(
            user,
            InitiatePayment {
                email: request.email,
                amount: request.amount,
                currency: request.currency,
                callback_url: request.callback_url,
                target,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(initiated.into()))
}
