//! Paystack REST client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{
    GatewayAuthorization, GatewayError, GatewayTransaction, InitializeTransaction, PaymentGateway,
};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Configuration for connecting to Paystack.
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// Secret key, e.g. `"sk_live_..."`. Sent as a bearer token.
    pub secret_key: String,

    /// API base URL; [`DEFAULT_BASE_URL`] in production, overridable for
    /// sandboxes.
    pub base_url: String,
}

/// HTTP client for the two Paystack transaction operations this service uses.
#[derive(Debug, Clone)]
pub struct PaystackClient {
    config: PaystackConfig,
    http: Client,
}

impl PaystackClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize_transaction(
        &self,
        request: InitializeTransaction,
    ) -> Result<GatewayAuthorization, GatewayError> {
        let url = format!("{}/transaction/initialize", self.config.base_url);

        let body = InitializeBody {
            email: request.email,
            amount: request.amount_minor,
            currency: request.currency,
            callback_url: request.callback_url,
            metadata: request.metadata,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&body)
            .send()
            .await?;

        let envelope: Envelope<InitializeData> = read_envelope(response).await?;

        let data = unwrap_data(envelope)?;

        Ok(GatewayAuthorization {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<GatewayTransaction, GatewayError> {
        let url = format!("{}/transaction/verify/{reference}", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        let envelope: Envelope<TransactionData> = read_envelope(response).await?;

        let data = unwrap_data(envelope)?;

        Ok(GatewayTransaction {
            status: data.status,
            amount_minor: data.amount,
            currency: data.currency,
        })
    }
}

/// Parse the standard `{status, message, data}` envelope, treating a non-2xx
/// response with a parseable envelope as a gateway rejection.
async fn read_envelope<T>(response: reqwest::Response) -> Result<Envelope<T>, GatewayError>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<Envelope<T>>(&text) {
        Ok(envelope) => Ok(envelope),
        Err(_) => Err(GatewayError::UnexpectedResponse(format!(
            "status {status}: {text}"
        ))),
    }
}

fn unwrap_data<T>(envelope: Envelope<T>) -> Result<T, GatewayError> {
    if !envelope.status {
        return Err(GatewayError::Declined(envelope.message));
    }

    envelope.data.ok_or_else(|| {
        GatewayError::UnexpectedResponse(format!(
            "successful response carried no data: {}",
            envelope.message
        ))
    })
}

#[derive(Debug, Serialize)]
struct InitializeBody {
    email: String,
    amount: u64,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<String>,
    metadata: Value,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct TransactionData {
    status: String,
    amount: u64,
    currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_envelope_deserializes() {
        let body = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/0peioxfhpn",
                "access_code": "0peioxfhpn",
                "reference": "7PVGX8MEk85tgeEpVDtD"
            }
        }"#;

        let envelope: Envelope<InitializeData> =
            serde_json::from_str(body).expect("envelope should deserialize");

        let data = unwrap_data(envelope).expect("data should be present");

        assert_eq!(data.reference, "7PVGX8MEk85tgeEpVDtD");
        assert_eq!(data.access_code, "0peioxfhpn");
    }

    #[test]
    fn declined_envelope_surfaces_the_gateway_message() {
        let body = r#"{
            "status": false,
            "message": "Invalid key"
        }"#;

        let envelope: Envelope<InitializeData> =
            serde_json::from_str(body).expect("envelope should deserialize");

        let result = unwrap_data(envelope);

        assert!(
            matches!(result, Err(GatewayError::Declined(message)) if message == "Invalid key"),
            "expected Declined with the gateway message"
        );
    }

    #[test]
    fn verify_envelope_carries_minor_units() {
        let body = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": "success",
                "amount": 500000,
                "currency": "NGN"
            }
        }"#;

        let envelope: Envelope<TransactionData> =
            serde_json::from_str(body).expect("envelope should deserialize");

        let data = unwrap_data(envelope).expect("data should be present");

        assert_eq!(data.status, "success");
        assert_eq!(data.amount, 500_000);
    }

    #[test]
    fn callback_url_is_omitted_when_absent() {
        let body = InitializeBody {
            email: "buyer@example.com".to_string(),
            amount: 100_000,
            currency: "NGN".to_string(),
            callback_url: None,
            metadata: serde_json::json!({}),
        };

        let json = serde_json::to_value(&body).expect("body should serialize");

        assert!(json.get("callback_url").is_none());
    }
}
