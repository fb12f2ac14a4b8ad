use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use bookshelf_auth::config::AccountServiceConfig;
use bookshelf_auth::routes::init_account_routes;
use bookshelf_auth::storage::{MemoryAccountRepository, RedisSessionStore, SessionStore};
use bookshelf_auth::{Authenticator, CredentialVerifier, Role};
use log::{error, info};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AccountServiceConfig::from_env().map_err(|err| {
        error!("Invalid account service configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let sessions: Arc<dyn SessionStore> = Arc::new(
        RedisSessionStore::connect(&config.redis_url, config.session_ttl)
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?,
    );
    let authenticator = web::Data::new(Authenticator::new(
        Arc::new(MemoryAccountRepository::new()),
        sessions.clone(),
        config.secrets.clone(),
        config.token_ttl,
    ));
    let verifier = web::Data::new(CredentialVerifier::new(config.secrets.clone(), sessions));

    if let Some(seed) = &config.admin_seed {
        authenticator
            .register(&seed.username, &seed.email, &seed.password, Role::Admin)
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    }

    info!("Account service listening on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(authenticator.clone())
            .app_data(verifier.clone())
            .configure(init_account_routes)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
