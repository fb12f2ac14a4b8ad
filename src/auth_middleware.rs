use crate::auth::forwarder::{AuthForwarder, VerifiedUser};
use crate::core::role::Role;
use crate::error::ForwardError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::error;
use std::rc::Rc;
use std::sync::Arc;

/// Role a request must be authorized for, assigned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequirement(pub Role);

/// Stamps a fixed [`RoleRequirement`] on every request it sees.
///
/// Must run before [`DelegatedAuthorization`]; in actix the middleware
/// registered last runs first, so wrap with `AssignRole` after it:
///
/// ```ignore
/// web::post()
///     .to(create_book)
///     .wrap(DelegatedAuthorization::new(forwarder))
///     .wrap(AssignRole::new(Role::Admin))
/// ```
pub struct AssignRole {
    role: Role,
}

impl AssignRole {
    pub fn new(role: Role) -> Self {
        AssignRole { role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AssignRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AssignRoleService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AssignRoleService {
            service,
            role: self.role,
        }))
    }
}

pub struct AssignRoleService<S> {
    service: S,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for AssignRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        req.extensions_mut().insert(RoleRequirement(self.role));
        self.service.call(req)
    }
}

/// Gates a handler on the account service's verdict for the request's
/// [`RoleRequirement`].
///
/// Denials are relayed with the account service's status and the handler is
/// never called. On approval the [`VerifiedUser`] is attached to the request.
pub struct DelegatedAuthorization {
    forwarder: Arc<AuthForwarder>,
}

impl DelegatedAuthorization {
    pub fn new(forwarder: Arc<AuthForwarder>) -> Self {
        DelegatedAuthorization { forwarder }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DelegatedAuthorization
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = DelegatedAuthorizationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DelegatedAuthorizationService {
            service: Rc::new(service),
            forwarder: self.forwarder.clone(),
        }))
    }
}

pub struct DelegatedAuthorizationService<S> {
    service: Rc<S>,
    forwarder: Arc<AuthForwarder>,
}

impl<S, B> Service<ServiceRequest> for DelegatedAuthorizationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let forwarder = self.forwarder.clone();

        Box::pin(async move {
            let role = req
                .extensions()
                .get::<RoleRequirement>()
                .map(|requirement| requirement.0);
            let role = match role {
                Some(role) => role,
                None => {
                    error!(
                        "{} {} reached delegated authorization without a role",
                        req.method(),
                        req.path()
                    );
                    return Ok(req
                        .error_response(ForwardError::MissingRole)
                        .map_into_right_body());
                }
            };

            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.as_bytes().to_vec());

            match forwarder.authorize(role, authorization.as_deref()).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                // The handler never runs on a denial.
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

impl FromRequest for VerifiedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<VerifiedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => {
                error!("{} handler requires a verified user but none was attached", req.path());
                ready(Err(ForwardError::Unverified.into()))
            }
        }
    }
}
