use crate::authentication::Authenticator;
use crate::core::role::Role;
use crate::error::AuthError;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// `POST /api/accounts/register`. Self-registration always yields a `User`.
pub async fn register(
    body: web::Json<RegisterRequest>,
    authenticator: web::Data<Authenticator>,
) -> Result<HttpResponse, AuthError> {
    let account = authenticator
        .register(&body.username, &body.email, &body.password, Role::User)
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        username: account.username,
        email: account.email,
        role: account.role,
    }))
}

/// `POST /api/accounts/login`
pub async fn login(
    body: web::Json<LoginRequest>,
    authenticator: web::Data<Authenticator>,
) -> Result<HttpResponse, AuthError> {
    let token = authenticator.login(&body.username, &body.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::role::DomainSecrets;
    use crate::error::ErrorBody;
    use crate::storage::{MemoryAccountRepository, MemorySessionStore};
    use actix_web::{test, App};
    use std::sync::Arc;
    use std::time::Duration;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            Arc::new(MemoryAccountRepository::new()),
            Arc::new(MemorySessionStore::new()),
            DomainSecrets::new("admin-secret", "user-secret"),
            Duration::from_secs(300),
        )
        .with_bcrypt_cost(4)
    }

    #[actix_web::test]
    async fn test_register_then_login() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(authenticator()))
                .route("/api/accounts/register", web::post().to(register))
                .route("/api/accounts/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/accounts/register")
            .set_json(&RegisterRequest {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "Valid1!".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let registered: RegisterResponse = test::read_body_json(resp).await;
        assert_eq!(registered.role, Role::User);

        let req = test::TestRequest::post()
            .uri("/api/accounts/login")
            .set_json(&LoginRequest {
                username: "alice".to_string(),
                password: "Valid1!".to_string(),
            })
            .to_request();
        let resp: LoginResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.token.split('.').count(), 3);
    }

    #[actix_web::test]
    async fn test_login_with_bad_password_is_unauthorized() {
        let auth = authenticator();
        auth.register("alice", "alice@example.com", "Valid1!", Role::User)
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth))
                .route("/api/accounts/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/accounts/login")
            .set_json(&LoginRequest {
                username: "alice".to_string(),
                password: "nope".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.message, "Invalid credentials");
    }

    #[actix_web::test]
    async fn test_duplicate_registration_conflicts() {
        let auth = authenticator();
        auth.register("alice", "alice@example.com", "Valid1!", Role::User)
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth))
                .route("/api/accounts/register", web::post().to(register)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/accounts/register")
            .set_json(&RegisterRequest {
                username: "alice".to_string(),
                email: "again@example.com".to_string(),
                password: "Valid1!".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
    }
}
