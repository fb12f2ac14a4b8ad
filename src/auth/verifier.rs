use crate::core::role::{DomainSecrets, Role};
use crate::core::types::SessionRecord;
use crate::error::AuthError;
use crate::jwt::decode_session_token;
use crate::storage::SessionStore;
use log::debug;
use std::sync::Arc;

/// Resolves a bearer token to the current user attributes for one trust domain.
///
/// Returns `Ok(Some(record))` only when the token's signature is valid under
/// the domain's secret, the token has not expired, and its session id still
/// resolves in the store. Every credential problem collapses to `Ok(None)`;
/// a store failure is returned as `Err` so it is never mistaken for a denial.
#[derive(Clone)]
pub struct CredentialVerifier {
    secrets: DomainSecrets,
    sessions: Arc<dyn SessionStore>,
}

impl CredentialVerifier {
    pub fn new(secrets: DomainSecrets, sessions: Arc<dyn SessionStore>) -> Self {
        CredentialVerifier { secrets, sessions }
    }

    pub async fn verify(&self, token: &str, role: Role) -> Result<Option<SessionRecord>, AuthError> {
        let claims = match decode_session_token(token, self.secrets.secret_for(role)) {
            Ok(claims) => claims,
            Err(err) => {
                debug!("Token rejected in {} domain: {}", role, err);
                return Ok(None);
            }
        };

        let record = self.sessions.get_session(&claims.sub).await?;
        if record.is_none() {
            debug!("No session record for id {} ({} domain)", claims.sub, role);
        }
        Ok(record)
    }
}
