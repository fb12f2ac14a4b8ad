// Expose the core, auth, endpoints, and storage modules
pub mod auth;
pub mod auth_middleware;
pub mod authentication;
pub mod config;
pub mod core;
pub mod endpoints;
pub mod error;
pub mod jwt;
pub mod routes;
pub mod storage;

pub use auth::{AuthForwarder, CredentialVerifier, VerifiedUser};
pub use authentication::Authenticator;
pub use crate::core::role::{DomainEndpoints, DomainSecrets, Role};
