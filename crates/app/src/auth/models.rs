//! Auth Models

use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// User UUID — the authenticated identity every scoped operation receives.
pub type UserUuid = TypedUuid<User>;

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
}

/// New API token row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,

    /// SHA-256 hash of the raw token; the raw token is never stored.
    pub token_hash: String,
}
