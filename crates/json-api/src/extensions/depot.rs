//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use souk_app::auth::models::UserUuid;

const USER_UUID_KEY: &str = "souk.user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated identity for downstream handlers.
    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated identity, or 401 when auth middleware did not run.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
