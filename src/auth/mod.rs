pub mod forwarder;
pub mod verifier;

pub use forwarder::{AuthForwarder, VerifiedUser, USER_NAME_HEADER};
pub use verifier::CredentialVerifier;
