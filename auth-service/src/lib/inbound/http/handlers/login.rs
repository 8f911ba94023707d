use axum::extract::State;
use axum::Json;

use super::signup::AuthResponseData;
use super::signup::CredentialsBody;
use super::ApiError;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<AuthResponseData>, ApiError> {
    state
        .auth_service
        .login(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|ref authenticated| Json(authenticated.into()))
}
