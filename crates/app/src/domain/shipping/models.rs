//! Shipping Models

/// A rate request as accepted by the resolver.
///
/// `destination_city` is carried for rate tables that price per city; the
/// current lookup keys on state only.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub subtotal: u64,
    pub total_weight: f64,
    pub destination_state: String,
    pub destination_city: Option<String>,
    pub method_code: String,
}

/// The resolved quote returned to the caller. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuote {
    pub zone_name: String,
    pub method_name: String,
    pub calculated_rate: u64,
    pub is_free_shipping: bool,
    pub delivery_time: String,
}

/// A matching row from the zone x method x weight-bracket rate tables.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub zone_name: String,
    pub method_name: String,
    pub rate: u64,

    /// Subtotal at or above which this zone/method ships free.
    pub free_above: Option<u64>,

    pub delivery_time: String,
}
