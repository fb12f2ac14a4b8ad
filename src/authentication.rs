use crate::core::role::{DomainSecrets, Role};
use crate::core::types::{Account, SessionRecord};
use crate::error::AuthError;
use crate::jwt::issue_session_token;
use crate::storage::{AccountRepository, SessionStore};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Registers accounts and opens sessions on the account service.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionStore>,
    secrets: DomainSecrets,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl Authenticator {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionStore>,
        secrets: DomainSecrets,
        token_ttl: Duration,
    ) -> Self {
        Authenticator {
            accounts,
            sessions,
            secrets,
            token_ttl,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Lower costs are only meant for tests.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, AuthError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidRequest(
                "username, email and password are required".to_string(),
            ));
        }

        let password_hash = hash(password, self.bcrypt_cost).map_err(|_| AuthError::HashingError)?;
        let account = Account {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            created_at: Utc::now(),
        };

        if !self.accounts.insert(account.clone()).await? {
            return Err(AuthError::DuplicateAccount(username.to_string()));
        }
        info!("Registered {} account {}", role, username);
        Ok(account)
    }

    /// Checks the password, stores a session record and returns a bearer
    /// token signed in the trust domain of the account's role.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let account = match self.accounts.find_by_username(username).await? {
            Some(account) => account,
            None => {
                warn!("Login attempt for unknown account {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify(password, &account.password_hash).map_err(|_| AuthError::HashingError)? {
            warn!("Login attempt with wrong password for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .save_session(&session_id, &SessionRecord::from_account(&account))
            .await?;

        let token = issue_session_token(&session_id, account.role, &self.secrets, self.token_ttl)?;
        info!("Opened session for {} ({})", account.username, account.role);
        Ok(token)
    }
}
