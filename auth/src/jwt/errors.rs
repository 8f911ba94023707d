use thiserror::Error;

/// Error type for token issuance and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
