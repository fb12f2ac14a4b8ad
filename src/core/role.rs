use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trust domain a request is gated on.
///
/// Every role owns its own signing secret and its own verification route on
/// the account service. A token verified in one domain never grants the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// Path segment of the inter-service verification route for this domain.
    pub fn inter_service_path(&self) -> &'static str {
        match self {
            Role::Admin => "/api/inter-service/admin",
            Role::User => "/api/inter-service/user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Signing secrets, one per trust domain.
#[derive(Clone)]
pub struct DomainSecrets {
    admin: Vec<u8>,
    user: Vec<u8>,
}

impl DomainSecrets {
    pub fn new(admin: impl Into<Vec<u8>>, user: impl Into<Vec<u8>>) -> Self {
        Self {
            admin: admin.into(),
            user: user.into(),
        }
    }

    pub fn secret_for(&self, role: Role) -> &[u8] {
        match role {
            Role::Admin => &self.admin,
            Role::User => &self.user,
        }
    }
}

// Never print the secrets themselves.
impl fmt::Debug for DomainSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainSecrets")
            .field("admin", &"<redacted>")
            .field("user", &"<redacted>")
            .finish()
    }
}

/// Verification URLs on the account service, one per trust domain.
#[derive(Debug, Clone)]
pub struct DomainEndpoints {
    admin: String,
    user: String,
}

impl DomainEndpoints {
    /// Builds both endpoints from the account service base URL,
    /// e.g. `http://account:3000`.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            admin: format!("{}{}", base, Role::Admin.inter_service_path()),
            user: format!("{}{}", base, Role::User.inter_service_path()),
        }
    }

    pub fn endpoint_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::User => &self.user,
        }
    }
}
