//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::auth::{
    errors::AuthServiceError,
    models::{NewApiToken, NewUser, User, UserUuid},
    repository::AuthRepository,
    token::{generate_api_token, hash_api_token},
};

/// A newly registered user together with their one-time-visible raw token.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user: User,
    pub api_token: String,
}

#[derive(Clone)]
pub struct PgAuthService {
    repository: Arc<dyn AuthRepository>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// Create a user and issue their first API token.
    ///
    /// # Errors
    ///
    /// Returns an error when either insert fails (duplicate email included).
    pub async fn register_user(&self, email: String) -> Result<RegisteredUser, AuthServiceError> {
        let user = self
            .repository
            .create_user(&NewUser {
                uuid: UserUuid::generate(),
                email,
            })
            .await?;

        let api_token = self.issue_api_token(user.uuid).await?;

        Ok(RegisteredUser { user, api_token })
    }

    /// Issue an additional API token for an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error when the insert fails (unknown user included).
    pub async fn issue_api_token(&self, user: UserUuid) -> Result<String, AuthServiceError> {
        let raw_token = generate_api_token();

        self.repository
            .create_api_token(&NewApiToken {
                uuid: Uuid::now_v7(),
                user_uuid: user,
                token_hash: hash_api_token(&raw_token),
            })
            .await?;

        Ok(raw_token)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        self.repository
            .find_user_by_token_hash(&hash_api_token(bearer_token))
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the identity it authenticates.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::{errors::AuthRepositoryError, repository::MockAuthRepository};

    use super::*;

    #[tokio::test]
    async fn authenticate_bearer_looks_up_the_token_hash() -> TestResult {
        let user = UserUuid::generate();
        let expected_hash = hash_api_token("sk_abc123");

        let mut repository = MockAuthRepository::new();

        repository
            .expect_find_user_by_token_hash()
            .once()
            .withf(move |hash| hash == expected_hash)
            .return_once(move |_| Ok(user));

        let service = PgAuthService::new(Arc::new(repository));

        let resolved = service.authenticate_bearer("sk_abc123").await?;

        assert_eq!(resolved, user);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tokens_are_not_found() {
        let mut repository = MockAuthRepository::new();

        repository
            .expect_find_user_by_token_hash()
            .once()
            .return_once(|_| Err(AuthRepositoryError::NotFound));

        let service = PgAuthService::new(Arc::new(repository));

        let result = service.authenticate_bearer("sk_missing").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn issued_tokens_are_stored_hashed_not_raw() -> TestResult {
        let user = UserUuid::generate();

        let mut repository = MockAuthRepository::new();

        repository
            .expect_create_api_token()
            .once()
            .withf(|token| {
                token.token_hash.len() == 64 && !token.token_hash.starts_with("sk_")
            })
            .return_once(|_| Ok(()));

        let service = PgAuthService::new(Arc::new(repository));

        let raw_token = service.issue_api_token(user).await?;

        assert!(raw_token.starts_with("sk_"));

        Ok(())
    }
}
