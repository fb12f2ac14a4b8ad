use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for every failure that must not leak detail to callers.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Failure of a backing store (session cache or in-process repository).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors raised on the account service side.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account `{0}` already exists")]
    DuplicateAccount(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("password hashing failed")]
    HashingError,
    #[error("token generation failed")]
    TokenGenerationError,
    /// Infrastructure trouble; never reported as an authorization denial.
    #[error("session store failure: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by the delegated-authorization forwarder.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// The account service answered with something other than 200.
    #[error("account service responded {status} {reason}")]
    Denied { status: u16, reason: String },
    #[error("no role requirement was assigned to the request")]
    MissingRole,
    #[error("handler requires a verified user but none was attached")]
    Unverified,
    #[error("account service response is missing the verified username")]
    MalformedResponse,
    /// No response at all: connection refused, DNS failure, reset.
    #[error("account service unreachable: {0}")]
    Unavailable(String),
}

/// Errors raised by the book and review handlers.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("resource not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            message: message.into(),
        }
    }
}

fn generic_server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorBody::new(GENERIC_SERVER_ERROR))
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateAccount(_) => StatusCode::CONFLICT,
            AuthError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::HashingError | AuthError::TokenGenerationError | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AuthError::InvalidCredentials => {
                HttpResponse::Unauthorized().json(ErrorBody::new("Invalid credentials"))
            }
            AuthError::DuplicateAccount(_) => {
                HttpResponse::Conflict().json(ErrorBody::new("Username is already taken"))
            }
            AuthError::InvalidRequest(reason) => {
                HttpResponse::BadRequest().json(ErrorBody::new(reason.clone()))
            }
            AuthError::HashingError | AuthError::TokenGenerationError | AuthError::Store(_) => {
                generic_server_error()
            }
        }
    }
}

impl ResponseError for ForwardError {
    fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::Denied { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Relay the account service's decision as-is.
            ForwardError::Denied { reason, .. } => {
                HttpResponse::build(self.status_code()).body(reason.clone())
            }
            _ => generic_server_error(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::NotFound => {
                HttpResponse::NotFound().json(ErrorBody::new("Resource not found"))
            }
            ServiceError::Forbidden => HttpResponse::Forbidden().finish(),
            ServiceError::BadRequest(reason) => {
                HttpResponse::BadRequest().json(ErrorBody::new(reason.clone()))
            }
            ServiceError::Store(_) => generic_server_error(),
        }
    }
}
