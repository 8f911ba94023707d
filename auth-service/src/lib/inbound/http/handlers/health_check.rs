/// Liveness probe; returns plain "ok" with 200.
pub async fn health_check() -> &'static str {
    "ok"
}
