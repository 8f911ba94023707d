use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Authenticated;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue an access token.
    ///
    /// # Arguments
    /// * `credentials` - Validated, normalized email and password
    ///
    /// # Returns
    /// Access token and the created user
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already taken
    /// * `Database` - Storage operation failed
    async fn signup(&self, credentials: Credentials) -> Result<Authenticated, AuthError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `credentials` - Validated, normalized email and password
    ///
    /// # Returns
    /// Access token and the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two
    ///   cases are deliberately indistinguishable to the caller
    /// * `Database` - Storage operation failed
    async fn login(&self, credentials: Credentials) -> Result<Authenticated, AuthError>;

    /// Revoke the session for a token id.
    ///
    /// # Arguments
    /// * `token_id` - jti from a verified token; an empty id is a no-op
    ///
    /// # Returns
    /// True iff an active session transitioned to revoked
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn logout(&self, token_id: &str) -> Result<bool, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    /// * `password_hash` - Hashed password in PHC string format
    ///
    /// # Returns
    /// Created user entity with storage-assigned id and timestamp
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email uniqueness violated
    /// * `Database` - Storage operation failed
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, AuthError>;

    /// Retrieve a user by normalized email.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by id.
    ///
    /// # Arguments
    /// * `id` - User id
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
}

/// Persistence operations for issued-token sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Record a new active session for an issued token.
    ///
    /// # Arguments
    /// * `user_id` - Owning user id
    /// * `token_id` - jti embedded in the issued token
    ///
    /// # Returns
    /// Created session row
    ///
    /// # Errors
    /// * `SessionConflict` - Token id already recorded; collisions are
    ///   rejected rather than silently overwritten
    /// * `Database` - Storage operation failed
    async fn insert(&self, user_id: &UserId, token_id: &str) -> Result<Session, AuthError>;

    /// Whether a session exists for the token id and has not been revoked.
    ///
    /// # Arguments
    /// * `token_id` - jti to check
    ///
    /// # Returns
    /// True iff an active row exists; a missing row is false, not an error
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn is_active(&self, token_id: &str) -> Result<bool, AuthError>;

    /// Revoke the session for a token id.
    ///
    /// Atomic conditional update: only a currently active row transitions,
    /// so concurrent revocations cannot both report success.
    ///
    /// # Arguments
    /// * `token_id` - jti to revoke
    ///
    /// # Returns
    /// True iff a row transitioned from active to revoked
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn revoke(&self, token_id: &str) -> Result<bool, AuthError>;
}
