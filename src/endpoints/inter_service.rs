use crate::auth::{CredentialVerifier, USER_NAME_HEADER};
use crate::core::role::Role;
use crate::error::AuthError;
use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use log::debug;

/// `GET /api/inter-service/admin`
pub async fn verify_admin(
    credentials: Option<BearerAuth>,
    verifier: web::Data<CredentialVerifier>,
) -> Result<HttpResponse, AuthError> {
    verify_for_domain(Role::Admin, credentials, &verifier).await
}

/// `GET /api/inter-service/user`
pub async fn verify_user(
    credentials: Option<BearerAuth>,
    verifier: web::Data<CredentialVerifier>,
) -> Result<HttpResponse, AuthError> {
    verify_for_domain(Role::User, credentials, &verifier).await
}

async fn verify_for_domain(
    role: Role,
    credentials: Option<BearerAuth>,
    verifier: &CredentialVerifier,
) -> Result<HttpResponse, AuthError> {
    let credentials = match credentials {
        Some(credentials) => credentials,
        None => {
            debug!("{} verification without a bearer token", role);
            return Ok(HttpResponse::Forbidden().finish());
        }
    };

    // A store failure propagates as a 500 through `AuthError`.
    match verifier.verify(credentials.token(), role).await? {
        Some(record) => Ok(HttpResponse::Ok()
            .insert_header((USER_NAME_HEADER, record.username))
            .json(serde_json::json!({}))),
        None => Ok(HttpResponse::Forbidden().finish()),
    }
}
