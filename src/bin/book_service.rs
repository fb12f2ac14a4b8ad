use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use bookshelf_auth::config::DownstreamConfig;
use bookshelf_auth::routes::init_book_routes;
use bookshelf_auth::storage::{BookRepository, MemoryBookRepository};
use bookshelf_auth::AuthForwarder;
use log::{error, info};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = DownstreamConfig::from_env("BOOK_BIND_ADDR", "0.0.0.0:3001").map_err(|err| {
        error!("Invalid book service configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let forwarder = Arc::new(
        AuthForwarder::new(config.endpoints(), config.account_timeout)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?,
    );
    let books: Arc<dyn BookRepository> = Arc::new(MemoryBookRepository::new());

    info!(
        "Book service listening on {} (account service: {})",
        config.bind_addr, config.account_service_url
    );
    HttpServer::new(move || {
        let forwarder = forwarder.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(books.clone()))
            .configure(move |cfg| init_book_routes(cfg, forwarder))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
