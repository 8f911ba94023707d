use auth::AccessClaims;
use auth::TokenIssuer;
use axum::extract::Request;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::SessionRepository;
use crate::domain::auth::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Identity attached to request extensions once the gate admits a request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub claims: AccessClaims,
}

/// Auth gate: verifies the bearer token and session liveness, then attaches
/// the resolved identity to the request.
///
/// Pre-flight requests and configured public paths pass through untouched.
/// Every rejection short-circuits with a 401 and a short detail string; the
/// only side effect before a handler runs is the session liveness read.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if req.method() == Method::OPTIONS || is_public_path(req.uri().path(), &state.public_paths) {
        return Ok(next.run(req).await);
    }

    // Expect Authorization: Bearer <token>
    let token = extract_bearer_token(&req)?;

    let identity = verify_token_identity(
        token,
        &state.token_issuer,
        state.session_repository.as_ref(),
        state.user_repository.as_ref(),
    )
    .await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Resolve a bearer token to an authenticated identity.
///
/// Checks, in order: token signature and claims, session liveness for the
/// token's jti, subject parseability, and user existence. Each failed check
/// rejects with a 401 and its own detail string; storage failures reject
/// with a 500.
async fn verify_token_identity<SR, UR>(
    token: &str,
    token_issuer: &TokenIssuer,
    sessions: &SR,
    users: &UR,
) -> Result<AuthenticatedUser, Response>
where
    SR: SessionRepository,
    UR: UserRepository,
{
    let claims = token_issuer.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        unauthorized("Invalid token")
    })?;

    if claims.jti.is_empty() || claims.sub.is_empty() {
        return Err(unauthorized("Invalid token"));
    }

    // Verify the session has not been revoked
    let active = sessions.is_active(&claims.jti).await.map_err(|e| {
        tracing::error!(error = %e, "Session lookup failed");
        internal_error()
    })?;
    if !active {
        return Err(unauthorized("Session revoked"));
    }

    let user_id = UserId::from_subject(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse token subject");
        unauthorized("Invalid subject")
    })?;

    let user = users
        .find_by_id(&user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "User lookup failed");
            internal_error()
        })?
        .ok_or_else(|| unauthorized("User not found"))?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email.as_str().to_string(),
        claims,
    })
}

// Exact match or prefix match on a path segment boundary.
fn is_public_path(path: &str, public_paths: &[String]) -> bool {
    public_paths
        .iter()
        .any(|public| path == public || path.starts_with(&format!("{}/", public)))
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Not authenticated"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Not authenticated"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Not authenticated"))?
        .trim();

    if token.is_empty() {
        return Err(unauthorized("Not authenticated"));
    }

    Ok(token)
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal Server Error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenConfig;
    use axum::body::Body;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::Session;
    use crate::domain::auth::models::User;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, AuthError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
        }
    }

    mock! {
        pub TestSessionRepository {}

        #[async_trait]
        impl SessionRepository for TestSessionRepository {
            async fn insert(&self, user_id: &UserId, token_id: &str) -> Result<Session, AuthError>;
            async fn is_active(&self, token_id: &str) -> Result<bool, AuthError>;
            async fn revoke(&self, token_id: &str) -> Result<bool, AuthError>;
        }
    }

    fn token_issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new(
            "test-secret-key-for-jwt-signing-at-least-32-bytes",
        ))
    }

    fn user_with_id(id: i64) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new("test@example.com").unwrap(),
            password_hash: "$argon2id$irrelevant".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn rejection_parts(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).expect("Body is not valid JSON");
        let detail = body["detail"]
            .as_str()
            .expect("Body has no detail string")
            .to_string();
        (status, detail)
    }

    #[tokio::test]
    async fn test_gate_rejects_garbage_token() {
        let issuer = token_issuer();
        let sessions = MockTestSessionRepository::new();
        let users = MockTestUserRepository::new();

        let result = verify_token_identity("not.a.jwt", &issuer, &sessions, &users).await;

        let (status, detail) = rejection_parts(result.err().expect("Gate admitted the token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(detail, "Invalid token");
    }

    #[tokio::test]
    async fn test_gate_rejects_revoked_session() {
        let issuer = token_issuer();
        let issued = issuer.issue("7").expect("Failed to issue token");

        let mut sessions = MockTestSessionRepository::new();
        let token_id = issued.token_id.clone();
        sessions
            .expect_is_active()
            .withf(move |jti| jti == token_id)
            .times(1)
            .returning(|_| Ok(false));
        let users = MockTestUserRepository::new();

        let result = verify_token_identity(&issued.token, &issuer, &sessions, &users).await;

        let (status, detail) = rejection_parts(result.err().expect("Gate admitted the token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(detail, "Session revoked");
    }

    #[tokio::test]
    async fn test_gate_rejects_unparseable_subject() {
        let issuer = token_issuer();
        let issued = issuer.issue("not-a-number").expect("Failed to issue token");

        let mut sessions = MockTestSessionRepository::new();
        sessions.expect_is_active().times(1).returning(|_| Ok(true));
        let users = MockTestUserRepository::new();

        let result = verify_token_identity(&issued.token, &issuer, &sessions, &users).await;

        let (status, detail) = rejection_parts(result.err().expect("Gate admitted the token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(detail, "Invalid subject");
    }

    #[tokio::test]
    async fn test_gate_rejects_unknown_user() {
        let issuer = token_issuer();
        let issued = issuer.issue("7").expect("Failed to issue token");

        let mut sessions = MockTestSessionRepository::new();
        sessions.expect_is_active().times(1).returning(|_| Ok(true));
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == UserId(7))
            .times(1)
            .returning(|_| Ok(None));

        let result = verify_token_identity(&issued.token, &issuer, &sessions, &users).await;

        let (status, detail) = rejection_parts(result.err().expect("Gate admitted the token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(detail, "User not found");
    }

    #[tokio::test]
    async fn test_gate_session_lookup_failure_is_internal_error() {
        let issuer = token_issuer();
        let issued = issuer.issue("7").expect("Failed to issue token");

        let mut sessions = MockTestSessionRepository::new();
        sessions
            .expect_is_active()
            .times(1)
            .returning(|_| Err(AuthError::Database("connection reset".to_string())));
        let users = MockTestUserRepository::new();

        let result = verify_token_identity(&issued.token, &issuer, &sessions, &users).await;

        let (status, detail) = rejection_parts(result.err().expect("Gate admitted the token")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_gate_attaches_identity_for_active_session() {
        let issuer = token_issuer();
        let issued = issuer.issue("7").expect("Failed to issue token");

        let mut sessions = MockTestSessionRepository::new();
        let token_id = issued.token_id.clone();
        sessions
            .expect_is_active()
            .withf(move |jti| jti == token_id)
            .times(1)
            .returning(|_| Ok(true));
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(user_with_id(id.0))));

        let identity = verify_token_identity(&issued.token, &issuer, &sessions, &users)
            .await
            .ok()
            .expect("Gate rejected an active session");

        assert_eq!(identity.user_id, UserId(7));
        assert_eq!(identity.email, "test@example.com");
        assert_eq!(identity.claims.jti, issued.token_id);
        assert_eq!(identity.claims.sub, "7");
    }

    fn public_paths() -> Vec<String> {
        vec![
            "/health-check".to_string(),
            "/auth/signup".to_string(),
            "/auth/login".to_string(),
        ]
    }

    #[test]
    fn test_public_path_exact_match() {
        assert!(is_public_path("/health-check", &public_paths()));
        assert!(is_public_path("/auth/login", &public_paths()));
    }

    #[test]
    fn test_public_path_prefix_match_on_segment_boundary() {
        assert!(is_public_path("/auth/login/extra", &public_paths()));
        // Prefix without a segment boundary is not public
        assert!(!is_public_path("/auth/login-other", &public_paths()));
    }

    #[test]
    fn test_protected_paths_are_not_public() {
        assert!(!is_public_path("/auth/logout", &public_paths()));
        assert!(!is_public_path("/auth/me", &public_paths()));
        assert!(!is_public_path("/", &public_paths()));
    }

    fn request_with_header(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/auth/logout");
        if let Some(value) = value {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        let req = request_with_header(None);
        assert!(extract_bearer_token(&req).is_err());
    }

    #[test]
    fn test_extract_bearer_token_malformed() {
        for malformed in ["abc.def.ghi", "Basic abc", "Bearer", "Bearer "] {
            let req = request_with_header(Some(malformed));
            assert!(
                extract_bearer_token(&req).is_err(),
                "expected {:?} to be rejected",
                malformed
            );
        }
    }
}
