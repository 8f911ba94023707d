use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Revoke the session of the presented token.
///
/// The token has already been verified by the auth gate; revocation keys off
/// the jti it attached to the request. `success` is false when the session
/// was already revoked, so a second logout with the same token id reports
/// false rather than failing.
pub async fn logout(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<LogoutResponseData>, ApiError> {
    // The gate always attaches the identity; guard anyway
    let Some(Extension(user)) = user else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    let revoked = state
        .auth_service
        .logout(&user.claims.jti)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LogoutResponseData { success: revoked }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub success: bool,
}
