use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use hivebook_core::constants::LOCAL_EXTERNAL_ID;
use hivebook_core::users::{AuthIdentity, User};

use crate::error::ApiError;
use crate::main_lib::AppState;

/// Minimum length of the HS256 secret shared with the auth provider.
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig").finish_non_exhaustive()
    }
}

/// Verifies bearer tokens issued by the external auth provider.
pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Internal(String),
}

/// Claims read from the provider's token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<Claims> for AuthIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            external_id: claims.sub,
            email: claims.email,
            display_name: claims.name,
        }
    }
}

/// Local user resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Reads the shared secret. `base64:`-prefixed values are decoded first.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let secret = match trimmed.strip_prefix("base64:") {
        Some(encoded) => BASE64
            .decode(encoded)
            .map_err(|e| anyhow::anyhow!("JWT secret is not valid base64: {e}"))?,
        None => trimmed.as_bytes().to_vec(),
    };
    if secret.len() < MIN_SECRET_LEN {
        anyhow::bail!("JWT secret must be at least {MIN_SECRET_LEN} bytes");
    }
    Ok(secret)
}

fn bearer_token(request: &Request<Body>) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }
    Ok(token)
}

/// Resolves the caller to a local user and stores it as [`CurrentUser`].
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = match state.auth.as_ref() {
        Some(auth) => AuthIdentity::from(auth.validate_token(bearer_token(&request)?)?),
        None => AuthIdentity::new(LOCAL_EXTERNAL_ID),
    };

    let user = state.user_service.resolve(identity).await?;
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn token(secret: &str, exp_offset: i64) -> String {
        let claims = Claims {
            sub: "auth0|keeper".to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            email: Some("keeper@example.com".to_string()),
            name: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn manager() -> AuthManager {
        AuthManager::new(&AuthConfig {
            jwt_secret: decode_secret_key(SECRET).unwrap(),
        })
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let claims = manager().validate_token(&token(SECRET, 3600)).unwrap();
        let identity = AuthIdentity::from(claims);
        assert_eq!(identity.external_id, "auth0|keeper");
        assert_eq!(identity.email.as_deref(), Some("keeper@example.com"));
    }

    #[test]
    fn test_rejects_expired_and_foreign_tokens() {
        assert!(matches!(
            manager().validate_token(&token(SECRET, -3600)),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            manager().validate_token(&token("ffffffffffffffffffffffffffffffff", 3600)),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            manager().validate_token("not-a-jwt"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_decode_secret_key() {
        assert_eq!(decode_secret_key(SECRET).unwrap(), SECRET.as_bytes());
        let encoded = format!("base64:{}", BASE64.encode([7u8; 32]));
        assert_eq!(decode_secret_key(&encoded).unwrap(), vec![7u8; 32]);
        assert!(decode_secret_key("  ").is_err());
        assert!(decode_secret_key("too-short").is_err());
    }
}
