//! Orders Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    auth::models::UserUuid,
    domain::orders::{
        errors::OrdersRepositoryError,
        models::{Order, OrderStatus, OrderUuid, PaymentStatus},
    },
};

const ATTACH_PAYMENT_SQL: &str = include_str!("sql/attach_payment.sql");
const RECORD_VERIFICATION_SQL: &str = include_str!("sql/record_verification.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn attach_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
        reference: &str,
        method: &str,
    ) -> Result<Order, OrdersRepositoryError> {
        query_as::<Postgres, Order>(ATTACH_PAYMENT_SQL)
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .bind(reference)
            .bind(method)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn record_verification(
        &self,
        user: UserUuid,
        reference: &str,
        payment_status: PaymentStatus,
        status: OrderStatus,
        verified_at: Timestamp,
    ) -> Result<Order, OrdersRepositoryError> {
        query_as::<Postgres, Order>(RECORD_VERIFICATION_SQL)
            .bind(user.into_uuid())
            .bind(reference)
            .bind(payment_status.as_str())
            .bind(status.as_str())
            .bind(SqlxTimestamp::from(verified_at))
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            total: try_get_amount(row, "total")?,
            status: try_parse_column(row, "status")?,
            payment_status: try_parse_column(row, "payment_status")?,
            payment_reference: row.try_get("payment_reference")?,
            payment_method: row.try_get("payment_method")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            payment_verified_at: try_get_optional_timestamp(row, "payment_verified_at")?,
            shipped_at: try_get_optional_timestamp(row, "shipped_at")?,
            delivered_at: try_get_optional_timestamp(row, "delivered_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_parse_column<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.try_get::<String, _>(col)?
        .parse()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

fn try_get_optional_timestamp(row: &PgRow, col: &str) -> Result<Option<Timestamp>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(col)?
        .map(SqlxTimestamp::to_jiff))
}

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Store the gateway reference on an order and mark its payment pending.
    ///
    /// Scoped to the owning identity; an order belonging to another user is
    /// treated as not found.
    async fn attach_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
        reference: &str,
        method: &str,
    ) -> Result<Order, OrdersRepositoryError>;

    /// Apply a verification outcome to the single order holding `reference`,
    /// updating payment status and fulfillment status as a pair.
    async fn record_verification(
        &self,
        user: UserUuid,
        reference: &str,
        payment_status: PaymentStatus,
        status: OrderStatus,
        verified_at: Timestamp,
    ) -> Result<Order, OrdersRepositoryError>;
}
