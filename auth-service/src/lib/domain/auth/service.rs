use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Authenticated;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::SessionRepository;
use crate::domain::auth::ports::UserRepository;

/// Domain service implementation for authentication use cases.
///
/// Stateless per-call orchestration over the user store, session registry,
/// password hasher, and token issuer; all mutable state lives in storage.
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `sessions` - Session registry implementation
    /// * `token_issuer` - Configured token issuer/verifier
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            users,
            sessions,
            token_issuer,
            password_hasher: PasswordHasher::new(),
        }
    }

    // Issues a token for the user and records its session before the token
    // is handed back, so an immediately following gated request sees the
    // session as active.
    async fn issue_session(&self, user: User) -> Result<Authenticated, AuthError> {
        let issued = self.token_issuer.issue(&user.id.to_string())?;
        let session = self.sessions.insert(&user.id, &issued.token_id).await?;

        tracing::debug!(
            user_id = %user.id,
            token_id = %session.token_id,
            "Session recorded"
        );

        Ok(Authenticated {
            access_token: issued.token,
            user,
        })
    }
}

#[async_trait]
impl<UR, SR> AuthServicePort for AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn signup(&self, credentials: Credentials) -> Result<Authenticated, AuthError> {
        let password_hash = self.password_hasher.hash(credentials.password.as_str())?;

        let user = self.users.create(&credentials.email, &password_hash).await?;
        tracing::info!(user_id = %user.id, "User created");

        self.issue_session(user).await
    }

    async fn login(&self, credentials: Credentials) -> Result<Authenticated, AuthError> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(credentials.password.as_str(), &user.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_session(user).await
    }

    async fn logout(&self, token_id: &str) -> Result<bool, AuthError> {
        if token_id.is_empty() {
            return Ok(false);
        }
        self.sessions.revoke(token_id).await
    }
}
