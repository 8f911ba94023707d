use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::signup::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity resolved by the auth gate.
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponseData> {
    Json(MeResponseData {
        user: UserData {
            id: user.user_id.0,
            email: user.email,
        },
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: UserData,
}
