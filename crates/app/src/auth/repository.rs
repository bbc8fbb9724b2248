//! Auth Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    errors::AuthRepositoryError,
    models::{NewApiToken, NewUser, User, UserUuid},
};

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn find_user_by_token_hash(&self, hash: &str) -> Result<UserUuid, AuthRepositoryError> {
        let row = query(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(AuthRepositoryError::from)?
            .ok_or(AuthRepositoryError::NotFound)?;

        let user_uuid: Uuid = row.try_get("user_uuid").map_err(AuthRepositoryError::from)?;

        Ok(UserUuid::from_uuid(user_uuid))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AuthRepositoryError> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn create_api_token(&self, token: &NewApiToken) -> Result<(), AuthRepositoryError> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid.into_uuid())
            .bind(&token.token_hash)
            .execute(&self.pool)
            .await
            .map_err(AuthRepositoryError::from)?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Resolve a stored token hash to its owning user.
    async fn find_user_by_token_hash(&self, hash: &str) -> Result<UserUuid, AuthRepositoryError>;

    /// Persist a new user row.
    async fn create_user(&self, user: &NewUser) -> Result<User, AuthRepositoryError>;

    /// Persist a new API token row.
    async fn create_api_token(&self, token: &NewApiToken) -> Result<(), AuthRepositoryError>;
}
