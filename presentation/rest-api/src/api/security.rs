use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::{Deserialize, Serialize};

use business::domain::shared::value_objects::UserId;

use crate::config::jwt_config::JwtConfig;

/// Claims issued by the authentication service. `sub` holds the numeric
/// user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Validates an HS256 token and returns the user it was issued to.
pub fn decode_user_id(token: &str, config: &JwtConfig) -> Result<UserId, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<CartClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    token_data
        .claims
        .sub
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(UserId::new)
        .ok_or_else(|| "auth.invalid_subject".to_string())
}

/// Resolves the caller from a raw `Authorization` header value, for
/// endpoints where authentication is optional.
pub fn user_from_authorization(header: Option<&str>, config: &JwtConfig) -> Option<UserId> {
    let token = header?.strip_prefix("Bearer ")?;
    match decode_user_id(token.trim(), config) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::debug!("Optional bearer rejected: {e}");
            None
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "jwt_bearer_checker")]
pub struct JwtBearer(pub UserId);

async fn jwt_bearer_checker(req: &Request, bearer: poem_openapi::auth::Bearer) -> Option<UserId> {
    let Some(config) = req.data::<Arc<JwtConfig>>() else {
        tracing::error!("JWT configuration missing from request data");
        return None;
    };

    match decode_user_id(&bearer.token, config) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("JWT auth failed: {e}");
            None
        }
    }
}
