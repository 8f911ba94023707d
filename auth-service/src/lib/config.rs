use std::env;

use auth::TokenConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing parameters.
///
/// Only the secret is mandatory; algorithm, issuer, audience, and TTL fall
/// back to the documented defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_ttl_minutes")]
    pub ttl_minutes: i64,
}

impl JwtConfig {
    /// Build the token issuer configuration from raw settings.
    ///
    /// # Errors
    /// `ConfigError::Message` if the algorithm name is not recognized
    pub fn token_config(&self) -> Result<TokenConfig, ConfigError> {
        let algorithm = self.algorithm.parse::<auth::Algorithm>().map_err(|e| {
            ConfigError::Message(format!("Invalid jwt algorithm '{}': {}", self.algorithm, e))
        })?;

        Ok(TokenConfig::new(&self.secret)
            .with_algorithm(algorithm)
            .with_issuer(&self.issuer)
            .with_audience(&self.audience)
            .with_ttl_minutes(self.ttl_minutes))
    }
}

/// Auth gate settings: paths reachable without a token.
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_paths: default_public_paths(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_attempts() -> u32 {
    10
}

fn default_connect_retry_delay_ms() -> u64 {
    1000
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_issuer() -> String {
    "auth-service".to_string()
}

fn default_jwt_audience() -> String {
    "auth-service-users".to_string()
}

fn default_jwt_ttl_minutes() -> i64 {
    60
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/health-check".to_string(),
        "/auth/signup".to_string(),
        "/auth/login".to_string(),
    ]
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        tracing::info!(run_mode = %run_mode, "Loading configuration");

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config: JwtConfig = serde_json::from_str(r#"{"secret": "s"}"#).unwrap();

        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.issuer, "auth-service");
        assert_eq!(config.audience, "auth-service-users");
        assert_eq!(config.ttl_minutes, 60);
        assert!(config.token_config().is_ok());
    }

    #[test]
    fn test_jwt_config_rejects_unknown_algorithm() {
        let config: JwtConfig =
            serde_json::from_str(r#"{"secret": "s", "algorithm": "ROT13"}"#).unwrap();

        assert!(config.token_config().is_err());
    }

    #[test]
    fn test_gate_config_default_public_paths() {
        let gate = GateConfig::default();

        assert!(gate.public_paths.contains(&"/health-check".to_string()));
        assert!(gate.public_paths.contains(&"/auth/signup".to_string()));
        assert!(gate.public_paths.contains(&"/auth/login".to_string()));
        assert!(!gate.public_paths.contains(&"/auth/logout".to_string()));
    }
}
