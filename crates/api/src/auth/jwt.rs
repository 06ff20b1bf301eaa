//! Validation of bearer tokens issued by the external identity provider.
//!
//! The provider owns user profiles and session lifecycles; this server
//! only verifies the token signature and reads the external user id from
//! `sub`. Roles are deliberately NOT carried in tokens — authorization is
//! resolved against the `user_roles` table per request, so a role change
//! takes effect without waiting for token expiry.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration (shared secret with the identity provider).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    /// Load from the `JWT_SECRET` env var, with a dev-only default.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        Self { secret }
    }
}

/// Claims this server reads from an identity-provider token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// External user id.
    pub sub: String,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

/// Validate a bearer token and return its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Mint a token for a user id. Used by the local dev token mint and the
/// integration tests; production tokens come from the identity provider.
pub fn create_token(
    user_id: &str,
    config: &JwtConfig,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() as usize + ttl_secs as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".into(),
        }
    }

    #[test]
    fn round_trip() {
        let token = create_token("user_abc", &config(), 60).unwrap();
        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "user_abc");
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = create_token("user_abc", &config(), 60).unwrap();
        let other = JwtConfig {
            secret: "different".into(),
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Expired well past the default validation leeway.
        let claims = Claims {
            sub: "user_abc".into(),
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }
}
