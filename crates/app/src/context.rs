//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthRepository, PgAuthService},
    database,
    domain::{
        events::PgAttendeesRepository,
        orders::PgOrdersRepository,
        payments::{PaymentsService, PgPaymentsService},
        shipping::{PgShippingRatesRepository, PgShippingService, ShippingService},
    },
    gateway::{PaymentGateway, PaystackClient, PaystackConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub shipping: Arc<dyn ShippingService>,
    pub payments: Arc<dyn PaymentsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and gateway config.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing the database connection fails.
    pub async fn from_database_url(
        url: &str,
        paystack: PaystackConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        Ok(Self::from_parts(pool, Arc::new(PaystackClient::new(paystack))))
    }

    /// Wire the production services over an existing pool and gateway.
    #[must_use]
    pub fn from_parts(pool: PgPool, gateway: Arc<dyn PaymentGateway>) -> Self {
        let orders = Arc::new(PgOrdersRepository::new(pool.clone()));
        let attendees = Arc::new(PgAttendeesRepository::new(pool.clone()));
        let rates = Arc::new(PgShippingRatesRepository::new(pool.clone()));
        let auth_repository = Arc::new(PgAuthRepository::new(pool));

        Self {
            shipping: Arc::new(PgShippingService::new(rates)),
            payments: Arc::new(PgPaymentsService::new(orders, attendees, gateway)),
            auth: Arc::new(PgAuthService::new(auth_repository)),
        }
    }
}
