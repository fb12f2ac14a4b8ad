use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use bookshelf_auth::config::DownstreamConfig;
use bookshelf_auth::routes::init_review_routes;
use bookshelf_auth::storage::{MemoryReviewRepository, ReviewRepository};
use bookshelf_auth::AuthForwarder;
use log::{error, info};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = DownstreamConfig::from_env("REVIEW_BIND_ADDR", "0.0.0.0:3002").map_err(|err| {
        error!("Invalid review service configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let forwarder = Arc::new(
        AuthForwarder::new(config.endpoints(), config.account_timeout)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?,
    );
    let reviews: Arc<dyn ReviewRepository> = Arc::new(MemoryReviewRepository::new());

    info!(
        "Review service listening on {} (account service: {})",
        config.bind_addr, config.account_service_url
    );
    HttpServer::new(move || {
        let forwarder = forwarder.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(reviews.clone()))
            .configure(move |cfg| init_review_routes(cfg, forwarder))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
