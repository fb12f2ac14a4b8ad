use crate::core::role::{DomainEndpoints, Role};
use crate::error::ForwardError;
use log::{debug, error, warn};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Response header carrying the username the account service verified.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Identity attached to a request after the account service approved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub username: String,
    pub role: Role,
}

/// Asks the account service whether a bearer token is valid for a role.
///
/// One round trip per call, no retries. The account service's decision is
/// final: any non-200 answer is relayed to the caller unchanged.
pub struct AuthForwarder {
    client: Client,
    endpoints: DomainEndpoints,
}

impl AuthForwarder {
    /// `timeout` of `None` keeps reqwest's default, which waits indefinitely.
    ///
    /// Redirects are never followed: a 3xx from the account service is a
    /// decision to relay, not a hop to take.
    pub fn new(endpoints: DomainEndpoints, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(AuthForwarder {
            client: builder.build()?,
            endpoints,
        })
    }

    /// The client must be built with `redirect(Policy::none())`, otherwise a
    /// redirect target could approve a request the account service refused.
    pub fn with_client(client: Client, endpoints: DomainEndpoints) -> Self {
        AuthForwarder { client, endpoints }
    }

    /// `authorization` is the caller's raw header value, forwarded byte for byte.
    pub async fn authorize(
        &self,
        role: Role,
        authorization: Option<&[u8]>,
    ) -> Result<VerifiedUser, ForwardError> {
        let url = self.endpoints.endpoint_for(role);
        let mut request = self.client.get(url);
        if let Some(raw) = authorization {
            match HeaderValue::from_bytes(raw) {
                Ok(value) => request = request.header(AUTHORIZATION, value),
                Err(_) => warn!("Dropping unforwardable Authorization header"),
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(transport_error(err)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Account service denied {} access: {}", role, status);
            return Err(denied(status));
        }

        let username = response
            .headers()
            .get(USER_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                warn!("Account service approved {} access without {}", role, USER_NAME_HEADER);
                ForwardError::MalformedResponse
            })?;

        Ok(VerifiedUser {
            username: username.to_string(),
            role,
        })
    }
}

/// The relayed reason is the status's canonical phrase. Non-standard codes
/// such as 499 have none and are relayed with an empty body.
fn denied(status: StatusCode) -> ForwardError {
    ForwardError::Denied {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

fn transport_error(err: reqwest::Error) -> ForwardError {
    match err.status() {
        Some(status) => denied(status),
        None => {
            error!("Account service call failed: {}", err);
            ForwardError::Unavailable(err.to_string())
        }
    }
}
