use anyhow::{Context, Result};
use std::env;

/// Process-wide configuration, read once at startup. Missing secrets abort
/// startup instead of letting the server run half-configured.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// HS256 signing key for access tokens.
    pub jwt_secret: String,
    /// Shared secret gating venue creation (X-API-Key header).
    pub admin_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            jwt_secret: require("SECRET_KEY")?,
            admin_api_key: require("ADMIN_API_KEY")?,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_all_secrets() {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("ADMIN_API_KEY");
        assert!(AppConfig::from_env().is_err());

        std::env::set_var("DATABASE_URL", "postgres://localhost/dinebook");
        std::env::set_var("SECRET_KEY", "test-secret");
        assert!(AppConfig::from_env().is_err(), "ADMIN_API_KEY still missing");

        std::env::set_var("ADMIN_API_KEY", "test-admin-key");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.jwt_secret, "test-secret");
    }
}
