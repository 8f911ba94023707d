use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::PasswordRuleError;
use crate::domain::auth::models::Authenticated;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<AuthResponseData>, ApiError> {
    state
        .auth_service
        .signup(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|ref authenticated| Json(authenticated.into()))
}

/// HTTP request body carrying raw credentials (shared with login)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
pub enum ParseCredentialsError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] PasswordRuleError),
}

impl CredentialsBody {
    pub fn try_into_credentials(self) -> Result<Credentials, ParseCredentialsError> {
        let email = EmailAddress::new(&self.email)?;
        let password = Password::new(self.password)?;
        Ok(Credentials::new(email, password))
    }
}

impl From<ParseCredentialsError> for ApiError {
    fn from(err: ParseCredentialsError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
}

impl From<&Authenticated> for AuthResponseData {
    fn from(authenticated: &Authenticated) -> Self {
        Self {
            access_token: authenticated.access_token.clone(),
            token_type: "bearer".to_string(),
            user: UserData {
                id: authenticated.user.id.0,
                email: authenticated.user.email.as_str().to_string(),
            },
        }
    }
}
