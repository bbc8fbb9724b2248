//! Shipping Rate Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use souk_app::domain::shipping::models::{RateRequest, ShippingQuote};

use crate::{extensions::*, state::State};

fn default_total_weight() -> f64 {
    1.0
}

fn default_method_code() -> String {
    "standard".to_string()
}

/// Shipping Rate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RateRequestBody {
    /// Cart subtotal in base-currency units
    pub subtotal: u64,

    /// Total parcel weight in kilograms
    #[serde(default = "default_total_weight")]
    pub total_weight: f64,

    /// Destination state
    pub destination_state: String,

    /// Destination city, when known
    #[serde(default)]
    pub destination_city: Option<String>,

    /// Shipping method code
    #[serde(default = "default_method_code")]
    pub method_code: String,
}

impl From<RateRequestBody> for RateRequest {
    fn from(body: RateRequestBody) -> Self {
        RateRequest {
            subtotal: body.subtotal,
            total_weight: body.total_weight,
            destination_state: body.destination_state,
            destination_city: body.destination_city,
            method_code: body.method_code,
        }
    }
}

/// Shipping Rate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RateResponse {
    pub zone_name: String,
    pub method_name: String,
    pub calculated_rate: u64,
    pub is_free_shipping: bool,
    pub delivery_time: String,
}

impl From<ShippingQuote> for RateResponse {
    fn from(quote: ShippingQuote) -> Self {
        Self {
            zone_name: quote.zone_name,
            method_name: quote.method_name,
            calculated_rate: quote.calculated_rate,
            is_free_shipping: quote.is_free_shipping,
            delivery_time: quote.delivery_time,
        }
    }
}

/// Shipping Rate Handler
#[endpoint(
    tags("shipping"),
    summary = "Quote shipping cost",
    responses(
        (status_code = StatusCode::OK, description = "Quote calculated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RateRequestBody>,
    depot: &mut Depot,
) -> Result<Json<RateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let quote = state.app.shipping.quote(json.into_inner().into()).await;

    Ok(Json(quote.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use souk_app::domain::shipping::MockShippingService;

    use crate::test_helpers::shipping_service;

    use super::*;

    fn make_service(shipping: MockShippingService) -> Service {
        shipping_service(
            shipping,
            Router::with_path("shipping").push(Router::with_path("rate").post(handler)),
        )
    }

    fn make_quote() -> ShippingQuote {
        ShippingQuote {
            zone_name: "South West".to_string(),
            method_name: "Standard".to_string(),
            calculated_rate: 1_500,
            is_free_shipping: false,
            delivery_time: "2-4 days".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rate_quote_success() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_quote()
            .once()
            .withf(|request| {
                request.subtotal == 12_000
                    && request.destination_state == "Lagos"
                    && request.method_code == "standard"
                    && (request.total_weight - 1.0).abs() < f64::EPSILON
            })
            .return_once(|_| make_quote());

        let mut res = TestClient::post("http://example.com/shipping/rate")
            .json(&json!({ "subtotal": 12_000, "destination_state": "Lagos" }))
            .send(&make_service(shipping))
            .await;

        let body: RateResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.zone_name, "South West");
        assert_eq!(body.calculated_rate, 1_500);
        assert!(!body.is_free_shipping);

        Ok(())
    }

    #[tokio::test]
    async fn test_request_defaults_are_applied() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_quote()
            .once()
            .withf(|request| {
                request.method_code == "express" && (request.total_weight - 2.5).abs() < f64::EPSILON
            })
            .return_once(|_| make_quote());

        let res = TestClient::post("http://example.com/shipping/rate")
            .json(&json!({
                "subtotal": 12_000,
                "destination_state": "Lagos",
                "total_weight": 2.5,
                "method_code": "express",
            }))
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_destination_state_returns_400_without_lookup() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping.expect_quote().never();

        let res = TestClient::post("http://example.com/shipping/rate")
            .json(&json!({ "subtotal": 12_000 }))
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_subtotal_returns_400_without_lookup() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping.expect_quote().never();

        let res = TestClient::post("http://example.com/shipping/rate")
            .json(&json!({ "destination_state": "Lagos" }))
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
