//! Shipping service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::domain::shipping::{
    models::{RateRequest, RateRow, ShippingQuote},
    repository::ShippingRatesRepository,
};

/// Subtotal at or above which the fallback rule ships free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 20_000;

/// Flat rate the fallback rule charges below the threshold.
pub const FALLBACK_FLAT_RATE: u64 = 2_000;

const FALLBACK_ZONE_NAME: &str = "Default Zone";
const FALLBACK_METHOD_NAME: &str = "Standard Shipping";
const FALLBACK_DELIVERY_TIME: &str = "3-5 days";

#[derive(Clone)]
pub struct PgShippingService {
    rates: Arc<dyn ShippingRatesRepository>,
}

impl PgShippingService {
    #[must_use]
    pub fn new(rates: Arc<dyn ShippingRatesRepository>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl ShippingService for PgShippingService {
    async fn quote(&self, request: RateRequest) -> ShippingQuote {
        let lookup = self
            .rates
            .find_rate(
                &request.destination_state,
                &request.method_code,
                request.total_weight,
            )
            .await;

        match lookup {
            Ok(Some(row)) => quote_from_rate(&request, &row),
            Ok(None) => fallback_quote(request.subtotal),
            Err(error) => {
                warn!(
                    %error,
                    destination_state = %request.destination_state,
                    method_code = %request.method_code,
                    "rate lookup failed, quoting fallback rates"
                );

                fallback_quote(request.subtotal)
            }
        }
    }
}

fn quote_from_rate(request: &RateRequest, row: &RateRow) -> ShippingQuote {
    let is_free_shipping = row
        .free_above
        .is_some_and(|threshold| request.subtotal >= threshold);

    ShippingQuote {
        zone_name: row.zone_name.clone(),
        method_name: row.method_name.clone(),
        calculated_rate: if is_free_shipping { 0 } else { row.rate },
        is_free_shipping,
        delivery_time: row.delivery_time.clone(),
    }
}

fn fallback_quote(subtotal: u64) -> ShippingQuote {
    let is_free_shipping = subtotal >= FREE_SHIPPING_THRESHOLD;

    ShippingQuote {
        zone_name: FALLBACK_ZONE_NAME.to_string(),
        method_name: FALLBACK_METHOD_NAME.to_string(),
        calculated_rate: if is_free_shipping {
            0
        } else {
            FALLBACK_FLAT_RATE
        },
        is_free_shipping,
        delivery_time: FALLBACK_DELIVERY_TIME.to_string(),
    }
}

#[automock]
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Quote delivery cost for a structurally valid request.
    ///
    /// Infallible by contract: any failure of the primary rate-table lookup
    /// (storage error or no matching bracket) resolves to the fallback rule
    /// instead of surfacing an error.
    async fn quote(&self, request: RateRequest) -> ShippingQuote;
}
