use crate::auth::AuthForwarder;
use crate::auth_middleware::{AssignRole, DelegatedAuthorization};
use crate::core::role::Role;
use crate::endpoints::{books, inter_service, login, reviews};
use actix_web::{web, Route};
use std::sync::Arc;

/// Puts a route behind delegated authorization for `role`.
///
/// `AssignRole` is wrapped last so it runs first and the forwarder always
/// finds a server-assigned requirement.
pub fn role_gated(route: Route, role: Role, forwarder: &Arc<AuthForwarder>) -> Route {
    route
        .wrap(DelegatedAuthorization::new(forwarder.clone()))
        .wrap(AssignRole::new(role))
}

/// Account service. Expects `web::Data<Authenticator>` and
/// `web::Data<CredentialVerifier>` in app data.
pub fn init_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/accounts/register").route(web::post().to(login::register)));
    cfg.service(web::resource("/api/accounts/login").route(web::post().to(login::login)));
    cfg.service(
        web::resource(Role::Admin.inter_service_path())
            .route(web::get().to(inter_service::verify_admin)),
    );
    cfg.service(
        web::resource(Role::User.inter_service_path())
            .route(web::get().to(inter_service::verify_user)),
    );
}

/// Book service. Expects `web::Data<Arc<dyn BookRepository>>` in app data.
pub fn init_book_routes(cfg: &mut web::ServiceConfig, forwarder: Arc<AuthForwarder>) {
    cfg.service(
        web::resource("/api/books")
            .route(web::get().to(books::list_books))
            .route(role_gated(
                web::post().to(books::create_book),
                Role::Admin,
                &forwarder,
            )),
    );
    cfg.service(
        web::resource("/api/books/{id}")
            .route(web::get().to(books::get_book))
            .route(role_gated(
                web::delete().to(books::delete_book),
                Role::Admin,
                &forwarder,
            )),
    );
}

/// Review service. Expects `web::Data<Arc<dyn ReviewRepository>>` in app data.
pub fn init_review_routes(cfg: &mut web::ServiceConfig, forwarder: Arc<AuthForwarder>) {
    cfg.service(
        web::resource("/api/reviews")
            .route(web::get().to(reviews::list_reviews))
            .route(role_gated(
                web::post().to(reviews::create_review),
                Role::User,
                &forwarder,
            )),
    );
    cfg.service(
        web::resource("/api/reviews/{id}").route(role_gated(
            web::delete().to(reviews::delete_review),
            Role::User,
            &forwarder,
        )),
    );
}
