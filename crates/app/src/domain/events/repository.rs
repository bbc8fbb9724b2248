//! Attendees Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Row, query};
use uuid::Uuid;

use crate::{
    auth::models::UserUuid,
    domain::events::{
        errors::AttendeesRepositoryError,
        models::{AttendeeUuid, EventUuid},
    },
};

const MARK_ATTENDEES_PENDING_SQL: &str = include_str!("sql/mark_attendees_pending.sql");

#[derive(Debug, Clone)]
pub struct PgAttendeesRepository {
    pool: PgPool,
}

impl PgAttendeesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeesRepository for PgAttendeesRepository {
    async fn mark_payment_pending(
        &self,
        user: UserUuid,
        event: EventUuid,
        attendees: &[AttendeeUuid],
    ) -> Result<Vec<AttendeeUuid>, AttendeesRepositoryError> {
        let ids: Vec<Uuid> = attendees.iter().copied().map(AttendeeUuid::into_uuid).collect();

        let rows = query(MARK_ATTENDEES_PENDING_SQL)
            .bind(user.into_uuid())
            .bind(event.into_uuid())
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AttendeesRepositoryError::from)?;

        rows.iter()
            .map(|row| row.try_get("uuid").map(AttendeeUuid::from_uuid))
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait AttendeesRepository: Send + Sync {
    /// Mark the caller-owned subset of `attendees` as payment-pending.
    ///
    /// Rows not owned by `user` (or not part of `event`) are skipped, not
    /// rejected. Returns the ids that were actually updated so callers can
    /// detect partial application.
    async fn mark_payment_pending(
        &self,
        user: UserUuid,
        event: EventUuid,
        attendees: &[AttendeeUuid],
    ) -> Result<Vec<AttendeeUuid>, AttendeesRepositoryError>;
}
