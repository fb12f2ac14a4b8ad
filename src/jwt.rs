use crate::core::role::{DomainSecrets, Role};
use crate::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Claims carried by a session bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session id in the token store.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(session_id: &str, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: session_id.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
}

/// Signs claims with HS256 under the given secret.
pub fn sign_claims(claims: &SessionClaims, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|_| AuthError::TokenGenerationError)
}

/// Issues a token for `session_id` in the trust domain of `role`.
pub fn issue_session_token(
    session_id: &str,
    role: Role,
    secrets: &DomainSecrets,
    ttl: Duration,
) -> Result<String, AuthError> {
    sign_claims(&SessionClaims::new(session_id, ttl), secrets.secret_for(role))
}

/// Checks signature and expiry against one secret and returns the claims.
pub fn decode_session_token(
    token: &str,
    secret: &[u8],
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
}
