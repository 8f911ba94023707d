use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health_check::health_check;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::signup::signup;
use super::middleware::authenticate;
use crate::domain::auth::service::AuthService;
use crate::outbound::repositories::PostgresSessionRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository, PostgresSessionRepository>>,
    pub user_repository: Arc<PostgresUserRepository>,
    pub session_repository: Arc<PostgresSessionRepository>,
    pub token_issuer: Arc<TokenIssuer>,
    pub public_paths: Arc<Vec<String>>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresUserRepository, PostgresSessionRepository>>,
    user_repository: Arc<PostgresUserRepository>,
    session_repository: Arc<PostgresSessionRepository>,
    token_issuer: Arc<TokenIssuer>,
    public_paths: Vec<String>,
) -> Router {
    let state = AppState {
        auth_service,
        user_repository,
        session_repository,
        token_issuer,
        public_paths: Arc::new(public_paths),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The auth gate wraps every route; its allow-list admits the public ones.
    Router::new()
        .route("/health-check", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
