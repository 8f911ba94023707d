pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::AccessClaims;
pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenConfig;
pub use issuer::TokenIssuer;

// Re-exported so consumers can configure the signing algorithm without
// depending on jsonwebtoken directly.
pub use jsonwebtoken::Algorithm;
