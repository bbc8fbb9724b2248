//! Shipping Rates Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Error, FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use thiserror::Error;

use crate::domain::shipping::models::RateRow;

const LOOKUP_RATE_SQL: &str = include_str!("sql/lookup_rate.sql");

#[derive(Debug, Error)]
pub enum ShippingRatesRepositoryError {
    #[error("storage error")]
    Sql(#[from] Error),
}

#[derive(Debug, Clone)]
pub struct PgShippingRatesRepository {
    pool: PgPool,
}

impl PgShippingRatesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for RateRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            zone_name: row.try_get("zone_name")?,
            method_name: row.try_get("method_name")?,
            rate: try_get_amount(row, "rate")?,
            free_above: row
                .try_get::<Option<i64>, _>("free_above")?
                .map(|amount| {
                    u64::try_from(amount).map_err(|e| Error::ColumnDecode {
                        index: "free_above".to_string(),
                        source: Box::new(e),
                    })
                })
                .transpose()?,
            delivery_time: row.try_get("delivery_time")?,
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

#[async_trait]
impl ShippingRatesRepository for PgShippingRatesRepository {
    async fn find_rate(
        &self,
        destination_state: &str,
        method_code: &str,
        total_weight: f64,
    ) -> Result<Option<RateRow>, ShippingRatesRepositoryError> {
        query_as::<Postgres, RateRow>(LOOKUP_RATE_SQL)
            .bind(destination_state)
            .bind(method_code)
            .bind(total_weight)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait ShippingRatesRepository: Send + Sync {
    /// Look up the rate-table row for a destination state, method code, and
    /// weight bracket. `Ok(None)` when no bracket matches.
    async fn find_rate(
        &self,
        destination_state: &str,
        method_code: &str,
        total_weight: f64,
    ) -> Result<Option<RateRow>, ShippingRatesRepositoryError>;
}
