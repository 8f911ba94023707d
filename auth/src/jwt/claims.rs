use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every issued access token.
///
/// All fields are mandatory: a token missing any of them fails
/// deserialization and is rejected during verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Subject (user id as string)
    pub sub: String,

    /// Token id (unique per issued token, tracked server-side for revocation)
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_all_claims() {
        let claims = AccessClaims {
            iss: "auth-service".to_string(),
            aud: "auth-service-users".to_string(),
            iat: 1_700_000_000,
            nbf: 1_700_000_000,
            exp: 1_700_003_600,
            sub: "42".to_string(),
            jti: "a1b2c3".to_string(),
        };

        let json = serde_json::to_string(&claims).expect("Failed to serialize claims");
        let decoded: AccessClaims = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_missing_jti_fails_deserialization() {
        let json = r#"{"iss":"i","aud":"a","iat":1,"nbf":1,"exp":2,"sub":"42"}"#;
        assert!(serde_json::from_str::<AccessClaims>(json).is_err());
    }
}
