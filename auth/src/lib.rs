//! Authentication primitives library
//!
//! Provides the building blocks used by the authentication backend:
//! - Password hashing (Argon2id)
//! - Signed access token issuance and verification (JWT, revocable via jti)
//!
//! The service crate defines its own ports and orchestration and adapts these
//! implementations. Keeping the cryptographic pieces here avoids coupling the
//! domain layer to specific crypto crates.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(TokenConfig::new("secret_key_at_least_32_bytes_long!"));
//! let issued = issuer.issue("42").unwrap();
//! let claims = issuer.verify(&issued.token).unwrap();
//! assert_eq!(claims.sub, "42");
//! assert_eq!(claims.jti, issued.token_id);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::Algorithm;
pub use jwt::IssuedToken;
pub use jwt::TokenConfig;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
