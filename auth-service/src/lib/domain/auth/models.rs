use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::PasswordRuleError;
use crate::domain::auth::errors::UserIdError;

/// User aggregate entity.
///
/// Created on signup, never mutated by this service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user id from a token subject claim.
    ///
    /// # Arguments
    /// * `subject` - Numeric user id as string
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - Subject is not a valid numeric id
    pub fn from_subject(subject: &str) -> Result<Self, UserIdError> {
        subject
            .parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized email address value type
///
/// Trims surrounding whitespace, validates the `local@domain.tld` shape, and
/// lowercases on construction, so every stored or looked-up email is already
/// in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalized email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated, trimmed, lowercased EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Empty, contains whitespace or extra `@`, or the
    ///   domain lacks an inner dot
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let email = email.trim();
        if Self::has_valid_shape(email) {
            Ok(Self(email.to_lowercase()))
        } else {
            Err(EmailError::InvalidFormat)
        }
    }

    // local@domain.tld: non-empty local and domain, no whitespace or second
    // `@` anywhere, domain containing a dot that is neither first nor last.
    fn has_valid_shape(email: &str) -> bool {
        if email.is_empty() || email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain
                .char_indices()
                .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Normalized email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated plaintext password value type
///
/// Enforces the minimum length rule before any hashing or storage I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Create a new validated password.
    ///
    /// # Arguments
    /// * `password` - Raw password string
    ///
    /// # Returns
    /// Validated Password value object
    ///
    /// # Errors
    /// * `TooShort` - Empty or shorter than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordRuleError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordRuleError::TooShort);
        }
        Ok(Self(password))
    }

    /// Get password as string slice.
    ///
    /// # Returns
    /// Plaintext password string slice (only ever fed to the hasher)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated credentials for signup and login
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

impl Credentials {
    /// Construct validated credentials.
    ///
    /// # Arguments
    /// * `email` - Validated, normalized email address
    /// * `password` - Validated password
    ///
    /// # Returns
    /// Credentials with validated fields
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Record of one issued token.
///
/// Active iff `revoked_at` is unset; transitions to revoked exactly once on
/// logout and is never deleted.
#[derive(Debug, Clone)]
pub struct Session {
    pub token_id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the session has not been revoked.
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// Result of a successful signup or login
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub access_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_plain_address() {
        let email = EmailAddress::new("a@b.com").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn test_email_normalizes_case_and_whitespace() {
        let email = EmailAddress::new("USER@X.com ").unwrap();
        assert_eq!(email.as_str(), "user@x.com");

        // Normalization is idempotent
        let again = EmailAddress::new(email.as_str()).unwrap();
        assert_eq!(again, email);
    }

    #[test]
    fn test_email_rejects_invalid_shapes() {
        for invalid in [
            "",
            "   ",
            "invalid-email",
            "@example.com",
            "user@",
            "user@nodot",
            "user@.com",
            "user@com.",
            "user@@example.com",
            "us er@example.com",
            "user@exam ple.com",
        ] {
            assert_eq!(
                EmailAddress::new(invalid),
                Err(EmailError::InvalidFormat),
                "expected {:?} to be rejected",
                invalid
            );
        }
    }

    #[test]
    fn test_email_accepts_subdomains() {
        assert!(EmailAddress::new("user@mail.example.com").is_ok());
    }

    #[test]
    fn test_password_minimum_length() {
        assert_eq!(
            Password::new("short".to_string()),
            Err(PasswordRuleError::TooShort)
        );
        assert_eq!(Password::new(String::new()), Err(PasswordRuleError::TooShort));
        assert!(Password::new("password123".to_string()).is_ok());
        assert!(Password::new("12345678".to_string()).is_ok());
    }

    #[test]
    fn test_user_id_from_subject() {
        assert_eq!(UserId::from_subject("42"), Ok(UserId(42)));
        assert!(UserId::from_subject("not-a-number").is_err());
        assert!(UserId::from_subject("").is_err());
    }

    #[test]
    fn test_session_active_iff_not_revoked() {
        let mut session = Session {
            token_id: "jti".to_string(),
            user_id: UserId(1),
            created_at: Utc::now(),
            revoked_at: None,
        };
        assert!(session.is_active());

        session.revoked_at = Some(Utc::now());
        assert!(!session.is_active());
    }
}
