use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Configuration for token issuance and verification.
///
/// Only the signing secret is mandatory; the remaining parameters default to
/// HS256, service-specific issuer/audience strings, and a 60 minute TTL.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    secret: String,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenConfig {
    /// Create a configuration with the given secret and documented defaults.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (should be at least 32 bytes for HS256)
    ///
    /// # Returns
    /// TokenConfig with HS256, default issuer/audience, and 60 minute TTL
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            issuer: "auth-service".to_string(),
            audience: "auth-service-users".to_string(),
            ttl_minutes: 60,
        }
    }

    /// Set the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the issuer claim.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the audience claim.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the access token lifetime in minutes.
    pub fn with_ttl_minutes(mut self, ttl_minutes: i64) -> Self {
        self.ttl_minutes = ttl_minutes;
        self
    }
}

/// A freshly issued access token together with its server-tracked id.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Signed JWT string
    pub token: String,

    /// The jti embedded in the token, to be recorded for revocation
    pub token_id: String,
}

/// Issues and verifies signed, expiring access tokens.
///
/// Every token carries a random jti so an otherwise stateless token can be
/// revoked server-side: the signature alone cannot express "this specific
/// token was logged out".
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenIssuer {
    /// Create a new token issuer from configuration.
    ///
    /// # Arguments
    /// * `config` - Secret, algorithm, issuer, audience, and TTL
    ///
    /// # Returns
    /// TokenIssuer ready to issue and verify tokens
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            issuer: config.issuer,
            audience: config.audience,
            ttl_minutes: config.ttl_minutes,
        }
    }

    /// Issue a signed access token for a subject.
    ///
    /// Generates a fresh random token id and a full claim set
    /// (iss, aud, iat, nbf, exp, sub, jti) before signing.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier to embed as the `sub` claim
    ///
    /// # Returns
    /// IssuedToken with the signed JWT and its token id
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        let token_id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        let claims = AccessClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
            sub: subject.to_string(),
            jti: token_id.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, token_id })
    }

    /// Verify a token's signature and registered claims.
    ///
    /// Rejects invalid signatures, expired or not-yet-valid tokens,
    /// issuer/audience mismatches, and malformed structures. No leeway is
    /// applied to time-based claims.
    ///
    /// # Arguments
    /// * `token` - JWT string to verify
    ///
    /// # Returns
    /// The full decoded claim set
    ///
    /// # Errors
    /// * `Expired` - Token expiry has passed
    /// * `NotYetValid` - Token nbf has not been reached
    /// * `IssuerMismatch` / `AudienceMismatch` - Registered claim mismatch
    /// * `Invalid` - Bad signature or malformed token
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                    ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
                    ErrorKind::InvalidAudience => TokenError::AudienceMismatch,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new(SECRET))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();

        let issued = issuer.issue("42").expect("Failed to issue token");
        assert!(!issued.token.is_empty());
        assert!(!issued.token_id.is_empty());

        let claims = issuer.verify(&issued.token).expect("Failed to verify token");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.jti, issued.token_id);
        assert_eq!(claims.iss, "auth-service");
        assert_eq!(claims.aud, "auth-service-users");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn test_token_ids_are_unique() {
        let issuer = issuer();

        let first = issuer.issue("42").expect("Failed to issue token");
        let second = issuer.issue("42").expect("Failed to issue token");

        assert_ne!(first.token_id, second.token_id);
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issued = issuer().issue("42").expect("Failed to issue token");

        let other = TokenIssuer::new(TokenConfig::new("another_secret_at_least_32_bytes!"));
        assert!(matches!(
            other.verify(&issued.token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let expired_issuer =
            TokenIssuer::new(TokenConfig::new(SECRET).with_ttl_minutes(-5));
        let issued = expired_issuer.issue("42").expect("Failed to issue token");

        assert_eq!(expired_issuer.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_issuer_mismatch() {
        let issued = issuer().issue("42").expect("Failed to issue token");

        let other = TokenIssuer::new(TokenConfig::new(SECRET).with_issuer("someone-else"));
        assert_eq!(other.verify(&issued.token), Err(TokenError::IssuerMismatch));
    }

    #[test]
    fn test_verify_audience_mismatch() {
        let issued = issuer().issue("42").expect("Failed to issue token");

        let other = TokenIssuer::new(TokenConfig::new(SECRET).with_audience("other-audience"));
        assert_eq!(other.verify(&issued.token), Err(TokenError::AudienceMismatch));
    }

    #[test]
    fn test_verify_malformed_token() {
        assert!(matches!(
            issuer().verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }
}
