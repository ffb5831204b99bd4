use std::env;

use super::error::ConfigError;

/// Settings for validating the HS256 bearer tokens issued by the
/// authentication service.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: Option<String>,
}

impl JwtConfig {
    /// Environment variables:
    /// - JWT_SECRET: Shared signing secret (required)
    /// - JWT_ISSUER: Expected `iss` claim (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingVariable("JWT_SECRET"))?;
        let issuer = env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty());

        Ok(Self { secret, issuer })
    }
}
